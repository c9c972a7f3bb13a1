use async_trait::async_trait;

use crate::domain::{Embedding, Table};

/// `clean_texts`, `embeddings` and `labels` are parallel to the rows of `table`.
pub struct ClusterSnapshot<'a> {
    pub table: &'a Table,
    pub clean_texts: &'a [String],
    pub embeddings: &'a [Embedding],
    pub labels: &'a [usize],
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn write_snapshot(
        &self,
        filename: &str,
        snapshot: ClusterSnapshot<'_>,
    ) -> Result<(), SnapshotStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotStoreError {
    #[error("snapshot encoding failed: {0}")]
    EncodingFailed(String),
    #[error("snapshot write failed: {0}")]
    WriteFailed(String),
}
