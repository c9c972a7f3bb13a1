use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{ClusterSnapshot, SnapshotStore, SnapshotStoreError};

pub struct MockSnapshotStore {
    written: RwLock<Vec<String>>,
}

impl Default for MockSnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSnapshotStore {
    pub fn new() -> Self {
        Self {
            written: RwLock::new(Vec::new()),
        }
    }

    pub fn written(&self) -> Vec<String> {
        self.written
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SnapshotStore for MockSnapshotStore {
    async fn write_snapshot(
        &self,
        filename: &str,
        _snapshot: ClusterSnapshot<'_>,
    ) -> Result<(), SnapshotStoreError> {
        self.written
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(filename.to_string());
        Ok(())
    }
}
