use async_trait::async_trait;

use crate::application::ports::{EmbeddingProvider, EmbeddingProviderError};
use crate::domain::Embedding;

const MOCK_DIMENSIONS: usize = 16;

pub struct MockEmbedder;

impl MockEmbedder {
    fn embed_one(text: &str) -> Embedding {
        let mut values = vec![0.0f32; MOCK_DIMENSIONS];
        for (i, byte) in text.bytes().enumerate() {
            values[i % MOCK_DIMENSIONS] += byte as f32 / 255.0;
        }
        Embedding::new(values).l2_normalized()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingProviderError> {
        Ok(texts.iter().map(|t| Self::embed_one(t)).collect())
    }
}
