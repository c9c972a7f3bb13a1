use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;

use crate::domain::{DatasetId, Task, TaskId, TaskStatus};

pub struct TaskTracker {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl Default for TaskTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskTracker {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
        }
    }

    /// Registers the task synchronously, strictly before any background work
    /// referencing the id may begin.
    pub fn create(&self, task_id: TaskId, dataset_id: DatasetId) -> Task {
        let task = Task::new(task_id, dataset_id);
        self.tasks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(task_id, task.clone());
        tracing::info!(task_id = %task_id, "Task registered");
        task
    }

    pub fn update(
        &self,
        task_id: TaskId,
        status: TaskStatus,
        progress: u8,
        message: &str,
        result: Option<DatasetId>,
    ) {
        let mut tasks = self.tasks.write().unwrap_or_else(PoisonError::into_inner);
        match tasks.get_mut(&task_id) {
            Some(task) => {
                task.status = status;
                task.progress = progress;
                task.message = message.to_string();
                task.result = result;
                task.timestamp = Utc::now();
                tracing::debug!(task_id = %task_id, status = %status, progress, "Task updated");
            }
            None => {
                tracing::warn!(task_id = %task_id, "Update for unknown task dropped");
            }
        }
    }

    pub fn get(&self, task_id: TaskId) -> Option<Task> {
        self.tasks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&task_id)
            .cloned()
    }
}
