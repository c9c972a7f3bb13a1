use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::application::ports::EmbeddingProvider;
use crate::application::services::token_budget::count_tokens_all;
use crate::domain::Embedding;

const RETRY_PACING: Duration = Duration::from_millis(500);

pub struct BatchEmbedder {
    provider: Arc<dyn EmbeddingProvider>,
    token_ceiling: usize,
    max_retries: u32,
}

impl BatchEmbedder {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, token_ceiling: usize, max_retries: u32) -> Self {
        Self {
            provider,
            token_ceiling,
            max_retries,
        }
    }

    pub fn token_ceiling(&self) -> usize {
        self.token_ceiling
    }

    /// Output order always matches input order; never returns partial output.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, BatchEmbedderError> {
        self.embed_recursive(texts).await
    }

    fn embed_recursive<'a>(
        &'a self,
        texts: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Embedding>, BatchEmbedderError>> {
        async move {
            if texts.is_empty() {
                return Ok(Vec::new());
            }

            if texts.len() > 1 && count_tokens_all(texts) > self.token_ceiling {
                let mid = texts.len() / 2;
                let mut left = self.embed_recursive(&texts[..mid]).await?;
                let right = self.embed_recursive(&texts[mid..]).await?;
                left.extend(right);
                return Ok(left);
            }

            for attempt in 0..=self.max_retries {
                if attempt > 0 {
                    tokio::time::sleep(RETRY_PACING).await;
                }

                match self.provider.embed(texts).await {
                    Ok(embeddings) => {
                        if embeddings.len() != texts.len() {
                            return Err(BatchEmbedderError::LengthMismatch {
                                sent: texts.len(),
                                received: embeddings.len(),
                            });
                        }
                        return Ok(embeddings);
                    }
                    Err(error) => {
                        // Bisect first so one bad text cannot poison the batch.
                        if attempt < self.max_retries && texts.len() > 1 {
                            if let Ok(embeddings) = self.embed_halves(texts).await {
                                return Ok(embeddings);
                            }
                        }

                        let wait = 2u64.pow(attempt);
                        tracing::warn!(
                            attempt = attempt + 1,
                            batch_len = texts.len(),
                            error = %error,
                            wait_secs = wait,
                            "Embedding attempt failed"
                        );
                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_secs(wait)).await;
                        }
                    }
                }
            }

            Err(BatchEmbedderError::RetriesExhausted {
                batch_len: texts.len(),
                attempts: self.max_retries + 1,
            })
        }
        .boxed()
    }

    async fn embed_halves(&self, texts: &[String]) -> Result<Vec<Embedding>, BatchEmbedderError> {
        let mid = texts.len() / 2;
        let mut left = self.embed_recursive(&texts[..mid]).await?;
        let right = self.embed_recursive(&texts[mid..]).await?;
        left.extend(right);
        Ok(left)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchEmbedderError {
    #[error("batch embedding failed for {batch_len} texts after {attempts} attempts")]
    RetriesExhausted { batch_len: usize, attempts: u32 },
    #[error("provider returned {received} vectors for {sent} texts")]
    LengthMismatch { sent: usize, received: usize },
}
