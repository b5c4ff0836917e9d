use thiserror::Error;

/// Failures detected locally, before any request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("year must be a whole number, got {input:?}")]
    InvalidYear { input: String },
    #[error("invalid API base url {input:?}: {reason}")]
    InvalidBaseUrl { input: String, reason: String },
}
