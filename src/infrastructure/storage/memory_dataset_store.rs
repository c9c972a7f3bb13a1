use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use crate::application::ports::{DatasetStore, DatasetStoreError};
use crate::domain::{DatasetId, Table};

struct StoredDataset {
    table: Table,
    filename: String,
}

pub struct InMemoryDatasetStore {
    datasets: RwLock<HashMap<DatasetId, StoredDataset>>,
}

impl Default for InMemoryDatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDatasetStore {
    pub fn new() -> Self {
        Self {
            datasets: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, table: Table, filename: &str) -> DatasetId {
        let id = mint_dataset_id(filename);
        self.datasets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                id.clone(),
                StoredDataset {
                    table,
                    filename: filename.to_string(),
                },
            );
        id
    }
}

#[async_trait]
impl DatasetStore for InMemoryDatasetStore {
    async fn load(&self, dataset_id: &DatasetId) -> Result<Table, DatasetStoreError> {
        self.datasets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(dataset_id)
            .map(|stored| stored.table.clone())
            .ok_or_else(|| DatasetStoreError::NotFound(dataset_id.to_string()))
    }

    async fn save(
        &self,
        table: &Table,
        filename: &str,
        description: &str,
    ) -> Result<DatasetId, DatasetStoreError> {
        let id = self.insert(table.clone(), filename);
        tracing::info!(dataset_id = %id, filename, description, "Dataset saved");
        Ok(id)
    }

    async fn get_original_filename(
        &self,
        dataset_id: &DatasetId,
    ) -> Result<String, DatasetStoreError> {
        self.datasets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(dataset_id)
            .map(|stored| stored.filename.clone())
            .ok_or_else(|| DatasetStoreError::NotFound(dataset_id.to_string()))
    }
}

fn mint_dataset_id(filename: &str) -> DatasetId {
    DatasetId::new(format!(
        "{}_{}",
        Utc::now().format("%Y%m%d_%H%M%S%3f"),
        filename.replace('.', "_")
    ))
}
