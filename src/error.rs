//! Error types for Fund Profiler.

/// Top-level error type for the profiler.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Advisor error: {0}")]
    Advisor(#[from] AdvisorError),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),
}

/// Configuration-related errors. Every variable has a default, so the only
/// failure mode is a value that does not parse.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Lead-store errors.
///
/// A malformed persisted lead list is NOT an error; the store recovers
/// locally by treating it as empty (see `store::traits::LeadStore::load`).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open database: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Advice-provider errors. Always recovered with a fallback string; never
/// surfaced to the user as a failure.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Scoring errors, produced only by the strict scoring variant.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("Answer map incomplete: {} question(s) unanswered", missing.len())]
    Incomplete { missing: Vec<u32> },
}

/// Result type alias for the profiler.
pub type Result<T> = std::result::Result<T, Error>;
