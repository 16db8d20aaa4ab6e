use crate::PostId;
use thiserror::Error;

/// Failures reported by a post store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("post store unavailable: {0}")]
    Unavailable(String),
    #[error("invalid post: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
    /// The store could not be reached, or the fetch ran past its deadline.
    #[error("post store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("invalid post: {0}")]
    Validation(String),

    /// The mutation went through but the ranking could not be recomputed;
    /// the cache still holds its previous value.
    #[error("post saved, ranking stale: {reason}")]
    ComputationSkipped { post_id: Option<PostId>, reason: String },
}

impl From<StoreError> for AnalyzerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(msg) => AnalyzerError::StoreUnavailable(msg),
            StoreError::Validation(msg) => AnalyzerError::Validation(msg),
        }
    }
}
