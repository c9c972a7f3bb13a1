use std::fs::File;

use polars::prelude::*;

use sibu::application::ports::{ClusterSnapshot, SnapshotStore};
use sibu::domain::{Embedding, Table};
use sibu::infrastructure::storage::LocalSnapshotStore;

fn sample_snapshot() -> (Table, Vec<String>, Vec<Embedding>, Vec<usize>) {
    let table = Table::new(
        vec!["number".to_string()],
        vec![
            vec!["INC001".to_string()],
            vec!["INC002".to_string()],
            vec!["INC003".to_string()],
        ],
    )
    .unwrap();
    let clean_texts = vec![
        "server down".to_string(),
        "server down again".to_string(),
        "invoice missing".to_string(),
    ];
    let embeddings = vec![
        Embedding::new(vec![1.0, 0.0]),
        Embedding::new(vec![0.9, 0.1]),
        Embedding::new(vec![0.0, 1.0]),
    ];
    let labels = vec![0, 0, 1];
    (table, clean_texts, embeddings, labels)
}

#[tokio::test]
async fn given_snapshot_when_written_then_parquet_file_appears_in_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalSnapshotStore::new(dir.path().to_path_buf()).unwrap();
    let (table, clean_texts, embeddings, labels) = sample_snapshot();

    store
        .write_snapshot(
            "clustering_intermediate_tickets.parquet",
            ClusterSnapshot {
                table: &table,
                clean_texts: &clean_texts,
                embeddings: &embeddings,
                labels: &labels,
            },
        )
        .await
        .unwrap();

    let path = dir.path().join("clustering_intermediate_tickets.parquet");
    assert!(path.exists());
    assert!(path.metadata().unwrap().len() > 0);
}

#[tokio::test]
async fn given_written_snapshot_when_read_back_then_layout_matches_input() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalSnapshotStore::new(dir.path().to_path_buf()).unwrap();
    let (table, clean_texts, embeddings, labels) = sample_snapshot();

    store
        .write_snapshot(
            "snapshot.parquet",
            ClusterSnapshot {
                table: &table,
                clean_texts: &clean_texts,
                embeddings: &embeddings,
                labels: &labels,
            },
        )
        .await
        .unwrap();

    let file = File::open(dir.path().join("snapshot.parquet")).unwrap();
    let frame = ParquetReader::new(file).finish().unwrap();

    assert_eq!(frame.height(), 3);
    let names: Vec<&str> = frame.get_column_names_str();
    assert_eq!(names, vec!["number", "clean_text", "embedding", "cluster_id"]);

    let cluster_ids: Vec<u32> = frame
        .column("cluster_id")
        .unwrap()
        .as_materialized_series()
        .u32()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(cluster_ids, vec![0, 0, 1]);
}

#[tokio::test]
async fn given_missing_data_dir_when_constructing_store_then_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("data").join("snapshots");

    LocalSnapshotStore::new(nested.clone()).unwrap();

    assert!(nested.is_dir());
}
