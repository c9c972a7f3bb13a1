use async_trait::async_trait;

use crate::domain::{DatasetId, Table};

#[async_trait]
pub trait DatasetStore: Send + Sync {
    async fn load(&self, dataset_id: &DatasetId) -> Result<Table, DatasetStoreError>;

    async fn save(
        &self,
        table: &Table,
        filename: &str,
        description: &str,
    ) -> Result<DatasetId, DatasetStoreError>;

    async fn get_original_filename(
        &self,
        dataset_id: &DatasetId,
    ) -> Result<String, DatasetStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetStoreError {
    #[error("dataset not found: {0}")]
    NotFound(String),
    #[error("dataset save failed: {0}")]
    SaveFailed(String),
    #[error("dataset load failed: {0}")]
    LoadFailed(String),
}
