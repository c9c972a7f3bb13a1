use sibu::application::services::TaskTracker;
use sibu::domain::{DatasetId, TaskId, TaskStatus};

fn dataset() -> DatasetId {
    DatasetId::new("20250101_000000000_tickets_csv")
}

#[test]
fn given_created_task_when_polling_immediately_then_it_is_pending() {
    let tracker = TaskTracker::new();
    let task_id = TaskId::new();

    tracker.create(task_id, dataset());

    let task = tracker.get(task_id).unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.progress, 0);
    assert_eq!(task.message, "Task created, preparing to start clustering...");
    assert!(task.result.is_none());
}

#[test]
fn given_update_when_applied_then_all_mutable_fields_change_together() {
    let tracker = TaskTracker::new();
    let task_id = TaskId::new();
    tracker.create(task_id, dataset());

    let result_id = DatasetId::new("20250101_000001000_clustered_tickets_csv");
    tracker.update(
        task_id,
        TaskStatus::Completed,
        100,
        "Clustering completed! Found 3 clusters.",
        Some(result_id.clone()),
    );

    let task = tracker.get(task_id).unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.progress, 100);
    assert_eq!(task.message, "Clustering completed! Found 3 clusters.");
    assert_eq!(task.result, Some(result_id));
}

#[test]
fn given_unknown_task_id_when_updating_then_nothing_is_created() {
    let tracker = TaskTracker::new();
    let unknown = TaskId::new();

    tracker.update(unknown, TaskStatus::Processing, 50, "halfway", None);

    assert!(tracker.get(unknown).is_none());
}

#[test]
fn given_unknown_task_id_when_polling_then_returns_none() {
    let tracker = TaskTracker::new();
    assert!(tracker.get(TaskId::new()).is_none());
}

#[test]
fn given_task_when_serialized_then_payload_matches_polling_contract() {
    let tracker = TaskTracker::new();
    let task_id = TaskId::new();
    tracker.create(task_id, dataset());
    let task = tracker.get(task_id).unwrap();

    let payload = serde_json::to_value(&task).unwrap();

    assert_eq!(payload["status"], "pending");
    assert_eq!(payload["progress"], 0);
    assert_eq!(payload["task_id"], task_id.as_uuid().to_string());
    assert!(payload["message"].is_string());
    assert!(payload["result"].is_null());
    assert!(payload["timestamp"].is_string());
}

#[test]
fn given_lifecycle_states_when_checking_terminality_then_only_final_states_qualify() {
    assert!(!TaskStatus::Pending.is_terminal());
    assert!(!TaskStatus::Processing.is_terminal());
    assert!(TaskStatus::Completed.is_terminal());
    assert!(TaskStatus::Failed.is_terminal());
}

#[test]
fn given_wire_strings_when_parsing_then_round_trips_through_as_str() {
    for status in [
        TaskStatus::Pending,
        TaskStatus::Processing,
        TaskStatus::Completed,
        TaskStatus::Failed,
    ] {
        let parsed: TaskStatus = status.as_str().parse().unwrap();
        assert_eq!(parsed, status);
    }
    assert!("running".parse::<TaskStatus>().is_err());
}
