use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{DatasetId, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serialization field names are the payload contract for polling clients.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub task_id: TaskId,
    pub dataset_id: DatasetId,
    pub status: TaskStatus,
    pub progress: u8,
    pub message: String,
    pub result: Option<DatasetId>,
    pub timestamp: DateTime<Utc>,
}

impl Task {
    pub fn new(task_id: TaskId, dataset_id: DatasetId) -> Self {
        Self {
            task_id,
            dataset_id,
            status: TaskStatus::Pending,
            progress: 0,
            message: "Task created, preparing to start clustering...".to_string(),
            result: None,
            timestamp: Utc::now(),
        }
    }
}
