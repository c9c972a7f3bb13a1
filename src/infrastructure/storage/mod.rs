mod local_snapshot_store;
mod memory_dataset_store;
mod mock_snapshot_store;

pub use local_snapshot_store::LocalSnapshotStore;
pub use memory_dataset_store::InMemoryDatasetStore;
pub use mock_snapshot_store::MockSnapshotStore;
