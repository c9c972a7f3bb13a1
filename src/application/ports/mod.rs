mod dataset_store;
mod embedding_provider;
mod llm_client;
mod snapshot_store;

pub use dataset_store::{DatasetStore, DatasetStoreError};
pub use embedding_provider::{EmbeddingProvider, EmbeddingProviderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use snapshot_store::{ClusterSnapshot, SnapshotStore, SnapshotStoreError};
