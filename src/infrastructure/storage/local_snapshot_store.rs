use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};
use polars::prelude::*;

use crate::application::ports::{ClusterSnapshot, SnapshotStore, SnapshotStoreError};

pub struct LocalSnapshotStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalSnapshotStore {
    pub fn new(base_path: PathBuf) -> Result<Self, SnapshotStoreError> {
        std::fs::create_dir_all(&base_path)
            .map_err(|e| SnapshotStoreError::WriteFailed(e.to_string()))?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| SnapshotStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

#[async_trait::async_trait]
impl SnapshotStore for LocalSnapshotStore {
    async fn write_snapshot(
        &self,
        filename: &str,
        snapshot: ClusterSnapshot<'_>,
    ) -> Result<(), SnapshotStoreError> {
        let mut frame = snapshot_frame(&snapshot)
            .map_err(|e| SnapshotStoreError::EncodingFailed(e.to_string()))?;

        let mut buffer: Vec<u8> = Vec::new();
        ParquetWriter::new(&mut buffer)
            .finish(&mut frame)
            .map_err(|e| SnapshotStoreError::EncodingFailed(e.to_string()))?;

        let store_path = StorePath::from(filename);
        self.inner
            .put(&store_path, PutPayload::from(Bytes::from(buffer)))
            .await
            .map_err(|e| SnapshotStoreError::WriteFailed(e.to_string()))?;

        tracing::info!(filename, "Saved intermediate clustering snapshot");
        Ok(())
    }
}

fn snapshot_frame(snapshot: &ClusterSnapshot<'_>) -> PolarsResult<DataFrame> {
    let table = snapshot.table;
    let mut columns: Vec<Column> = Vec::with_capacity(table.columns().len() + 3);

    for (index, name) in table.columns().iter().enumerate() {
        let values: Vec<String> = table
            .rows()
            .iter()
            .map(|row| row[index].clone())
            .collect();
        columns.push(Column::new(name.as_str().into(), values));
    }

    columns.push(Column::new(
        "clean_text".into(),
        snapshot.clean_texts.to_vec(),
    ));

    let embeddings: ListChunked = snapshot
        .embeddings
        .iter()
        .map(|e| Some(Series::new(PlSmallStr::EMPTY, e.values())))
        .collect();
    columns.push(
        embeddings
            .into_series()
            .with_name("embedding".into())
            .into_column(),
    );

    let labels: Vec<u32> = snapshot.labels.iter().map(|&label| label as u32).collect();
    columns.push(Column::new("cluster_id".into(), labels));

    DataFrame::new(columns)
}
