use async_trait::async_trait;

use crate::domain::Embedding;

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Returns exactly one vector per input text, in input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingProviderError {
    #[error("embedding api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("embedding rate limited")]
    RateLimited,
    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
}
