//! Lead persistence: the `LeadStore` trait and the persisted record shape.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::quiz::model::ContactInfo;
use crate::scoring::{AnswerMap, ScoreOutcome};

/// A completed quiz session: contact fields, answers, score, persona title
/// and selected fund codes. Append-only; the full list is stored as one
/// serialized collection, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub contact: ContactInfo,
    pub answers: AnswerMap,
    pub score: i32,
    pub persona: String,
    pub cart: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

impl Lead {
    /// Build a lead from a finished session's pieces.
    pub fn new(
        contact: ContactInfo,
        answers: AnswerMap,
        outcome: &ScoreOutcome,
        cart: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            contact,
            answers,
            score: outcome.total,
            persona: outcome.persona.title.to_string(),
            cart,
            submitted_at: Utc::now(),
        }
    }
}

/// Backend-agnostic lead store.
///
/// The whole list lives under a single named slot and is rewritten wholesale
/// on each submission. Lead volume is small enough that this never matters.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Load all persisted leads, newest first.
    ///
    /// A malformed stored payload is recovered locally: it is logged and
    /// treated as an empty list, never an error.
    async fn load(&self) -> Result<Vec<Lead>, StoreError>;

    /// Prepend a lead and rewrite the stored list.
    async fn record(&self, lead: Lead) -> Result<(), StoreError>;

    /// Delete all persisted leads.
    async fn clear(&self) -> Result<(), StoreError>;
}
