mod cluster;
mod dataset;
mod embedding;
mod task;
mod task_status;

pub use cluster::{ClusterAssignment, ClusterMember, ClusterSummary, RequestedClusters};
pub use dataset::{DatasetId, Table, TableError};
pub use embedding::Embedding;
pub use task::{Task, TaskId};
pub use task_status::TaskStatus;
