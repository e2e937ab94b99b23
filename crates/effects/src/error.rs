//! Error types for the effects core

/// Errors raised by the backdrop and its frame loop
#[derive(Debug, thiserror::Error)]
pub enum EffectsError {
    #[error("frame scheduling failed: {0}")]
    Schedule(String),
    #[error("invalid effects config: {0}")]
    Config(String),
    #[error("malformed effects config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EffectsError>;

/// Reasons the footer keeps its fallback text.
///
/// None of these reach the user; they exist so callers and tests can see
/// why nothing was written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FooterError {
    #[error("version request failed: {0}")]
    Network(String),
    #[error("version endpoint answered HTTP {0}")]
    Status(u16),
    #[error("version document is not valid JSON: {0}")]
    Malformed(String),
    #[error("version document has no usable `version` field")]
    MissingVersion,
}
