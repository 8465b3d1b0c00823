//! AI advice generation for the result screen.
//!
//! Supports:
//! - **Anthropic**: Direct API access via rig-core
//! - **OpenAI**: Direct API access via rig-core
//!
//! Advice is a fire-and-forget enhancement: any failure, timeout or absent
//! configuration falls back to a deterministic string templated from the
//! persona title, and never blocks or alters the quiz flow.

use std::sync::Arc;

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use secrecy::ExposeSecret;

use crate::error::AdvisorError;
use crate::quiz::model::ContactInfo;
use crate::scoring::Persona;

/// Supported advice backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisorBackend {
    Anthropic,
    OpenAi,
}

/// Configuration for creating an advice provider.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub backend: AdvisorBackend,
    pub api_key: secrecy::SecretString,
    pub model: String,
}

/// Everything the advice call needs from a finished session.
#[derive(Debug, Clone)]
pub struct AdviceRequest<'a> {
    pub persona: &'a Persona,
    pub contact: &'a ContactInfo,
    pub score: i32,
}

/// A collaborator that turns a scored session into short free-text advice.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    fn model_name(&self) -> &str;

    async fn advise(&self, request: AdviceRequest<'_>) -> Result<String, AdvisorError>;
}

const ADVISOR_PREAMBLE: &str = "\
You are a professional financial advisor. Write a short investment psychology \
and strategy analysis for the user described in the message, in about 200 \
words, covering: (1) their psychological strengths and blind spots as an \
investor, (2) a core allocation suggestion matched to their risk level, and \
(3) one encouraging one-line maxim about money. Address the user directly.";

/// Build the advice prompt from the persona, contact fields and score.
pub fn advice_prompt(request: &AdviceRequest<'_>) -> String {
    let experience = request
        .contact
        .experience
        .map(|e| e.to_string())
        .unwrap_or_else(|| "unspecified".to_string());
    format!(
        "User name: {name}\n\
         Investment experience: {experience}\n\
         Assessment score: {score}\n\
         Investor persona: {title}\n\
         Persona description: {description}\n\
         Risk level: {risk}/3",
        name = request.contact.name,
        title = request.persona.title,
        description = request.persona.description,
        risk = request.persona.risk_level,
        score = request.score,
    )
}

/// Deterministic advice used whenever no provider is configured or the call
/// fails.
pub fn fallback_advice(persona: &Persona) -> String {
    format!(
        "Your investor profile analysis is ready. Based on your assessment you \
         are a {}. {} Whatever the market does next, a steady core-satellite \
         allocation keeps risk and return in balance.",
        persona.title, persona.description
    )
}

/// Create an advice provider from configuration.
pub fn create_provider(config: &AdvisorConfig) -> Result<Arc<dyn AdviceProvider>, AdvisorError> {
    match config.backend {
        AdvisorBackend::Anthropic => create_anthropic_provider(config),
        AdvisorBackend::OpenAi => create_openai_provider(config),
    }
}

fn create_anthropic_provider(
    config: &AdvisorConfig,
) -> Result<Arc<dyn AdviceProvider>, AdvisorError> {
    use rig::providers::anthropic;

    let client: rig::client::Client<anthropic::client::AnthropicExt> =
        anthropic::Client::new(config.api_key.expose_secret()).map_err(|e| {
            AdvisorError::RequestFailed {
                provider: "anthropic".to_string(),
                reason: format!("Failed to create Anthropic client: {}", e),
            }
        })?;

    let agent = client
        .agent(&config.model)
        .preamble(ADVISOR_PREAMBLE)
        .temperature(0.7)
        .build();
    tracing::info!("Using Anthropic advisor (model: {})", config.model);
    Ok(Arc::new(RigAdvisor {
        agent,
        provider: "anthropic",
        model: config.model.clone(),
    }))
}

fn create_openai_provider(
    config: &AdvisorConfig,
) -> Result<Arc<dyn AdviceProvider>, AdvisorError> {
    use rig::providers::openai;

    let client: rig::client::Client<openai::client::OpenAIResponsesExt> =
        openai::Client::new(config.api_key.expose_secret()).map_err(|e| {
            AdvisorError::RequestFailed {
                provider: "openai".to_string(),
                reason: format!("Failed to create OpenAI client: {}", e),
            }
        })?;

    let agent = client
        .agent(&config.model)
        .preamble(ADVISOR_PREAMBLE)
        .temperature(0.7)
        .build();
    tracing::info!("Using OpenAI advisor (model: {})", config.model);
    Ok(Arc::new(RigAdvisor {
        agent,
        provider: "openai",
        model: config.model.clone(),
    }))
}

/// Bridges a rig agent to the `AdviceProvider` trait.
struct RigAdvisor<M: rig::completion::CompletionModel> {
    agent: rig::agent::Agent<M>,
    provider: &'static str,
    model: String,
}

#[async_trait]
impl<M: rig::completion::CompletionModel> AdviceProvider for RigAdvisor<M> {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn advise(&self, request: AdviceRequest<'_>) -> Result<String, AdvisorError> {
        let prompt = advice_prompt(&request);
        let text = self
            .agent
            .prompt(prompt)
            .await
            .map_err(|e| AdvisorError::RequestFailed {
                provider: self.provider.to_string(),
                reason: e.to_string(),
            })?;
        if text.trim().is_empty() {
            return Err(AdvisorError::InvalidResponse {
                provider: self.provider.to_string(),
                reason: "empty completion".to_string(),
            });
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::model::Experience;
    use crate::scoring::BALANCED_STRATEGIST;

    fn request(contact: &ContactInfo) -> AdviceRequest<'_> {
        AdviceRequest {
            persona: &BALANCED_STRATEGIST,
            contact,
            score: 112,
        }
    }

    #[test]
    fn prompt_carries_user_and_persona_fields() {
        let contact = ContactInfo {
            name: "Alice".to_string(),
            experience: Some(Experience::ThreeToTenYears),
            ..Default::default()
        };
        let prompt = advice_prompt(&request(&contact));
        assert!(prompt.contains("Alice"));
        assert!(prompt.contains("3-10 years"));
        assert!(prompt.contains("112"));
        assert!(prompt.contains("Balanced Strategist"));
        assert!(prompt.contains("2/3"));
    }

    #[test]
    fn prompt_handles_missing_experience() {
        let contact = ContactInfo::default();
        let prompt = advice_prompt(&request(&contact));
        assert!(prompt.contains("unspecified"));
    }

    #[test]
    fn fallback_is_templated_from_the_persona() {
        let text = fallback_advice(&BALANCED_STRATEGIST);
        assert!(text.contains("Balanced Strategist"));
        assert!(text.contains(BALANCED_STRATEGIST.description));
    }

    #[tokio::test]
    async fn create_provider_with_any_key_constructs() {
        // rig-core clients accept any string as API key at construction time.
        // The actual auth failure happens when making a request.
        let config = AdvisorConfig {
            backend: AdvisorBackend::Anthropic,
            api_key: secrecy::SecretString::from("test-key"),
            model: "claude-3-5-sonnet-latest".to_string(),
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.model_name(), "claude-3-5-sonnet-latest");
    }

    #[tokio::test]
    async fn create_openai_provider_constructs() {
        let config = AdvisorConfig {
            backend: AdvisorBackend::OpenAi,
            api_key: secrecy::SecretString::from("sk-test"),
            model: "gpt-4o".to_string(),
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.model_name(), "gpt-4o");
    }
}
