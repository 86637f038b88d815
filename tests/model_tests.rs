use chrono::{TimeZone, Utc};
use workpulse::models::{Difficulty, Task, TaskStatus, TaskType, Timeframe};
use workpulse::reports::{filter_reports, sample_reports};
use workpulse::store::TaskUpdate;

#[test]
fn test_task_wire_format() {
    let json = r#"{
        "taskName": "Quarterly report",
        "description": "Numbers for Q1",
        "assignedTo": "Sarah Johnson",
        "assignedBy": "Alex Kim",
        "taskType": "BAU",
        "difficulty": "hard",
        "priority": "urgent",
        "estimatedTime": 4.5,
        "status": "completed",
        "timestamp": "2024-03-01T09:00:00Z",
        "completedAt": "2024-03-02T17:30:00Z"
    }"#;
    let task: Task = serde_json::from_str(json).unwrap();
    assert_eq!(task.id, ""); // key is attached by the store client
    assert_eq!(task.task_name, "Quarterly report");
    assert_eq!(task.task_type, TaskType::Bau);
    assert_eq!(task.difficulty, Difficulty::Hard);
    assert_eq!(task.status, TaskStatus::Completed);
    assert!(task.completed_at.is_some());
}

#[test]
fn test_task_defaults_for_sparse_records() {
    // Early records in the store carry only the fields the first forms wrote
    let json = r#"{
        "taskName": "Old record",
        "assignedTo": "Sarah Johnson",
        "assignedBy": "Alex Kim",
        "difficulty": "easy",
        "status": "pending",
        "timestamp": "2024-01-15T10:00:00Z"
    }"#;
    let task: Task = serde_json::from_str(json).unwrap();
    assert_eq!(task.task_type, TaskType::Bau);
    assert_eq!(task.estimated_time, 0.0);
    assert!(task.completed_at.is_none());
}

#[test]
fn test_task_body_never_carries_id() {
    let json = r#"{
        "taskName": "T",
        "assignedTo": "A",
        "assignedBy": "B",
        "difficulty": "medium",
        "status": "pending",
        "timestamp": "2024-03-01T09:00:00Z"
    }"#;
    let mut task: Task = serde_json::from_str(json).unwrap();
    task.id = "record-key".into();
    let body = serde_json::to_value(&task).unwrap();
    assert!(body.get("id").is_none());
    assert!(body.get("completedAt").is_none());
    assert_eq!(body["status"], "pending");
}

#[test]
fn test_completion_patch_body() {
    // The PATCH body for a completion must carry both fields, with the
    // status on the wire as "completed"
    let completed_at = Utc.with_ymd_and_hms(2024, 3, 2, 17, 30, 0).unwrap();
    let update = TaskUpdate {
        status: Some(TaskStatus::Completed),
        completed_at: Some(completed_at),
    };
    let body = serde_json::to_value(&update).unwrap();
    assert_eq!(body["status"], "completed");
    assert_eq!(body["completedAt"], "2024-03-02T17:30:00Z");
}

#[test]
fn test_task_update_omits_unset_fields() {
    // PATCH merges whatever keys are present, so unset fields must be
    // absent from the body, not null
    let update = TaskUpdate::default();
    let body = serde_json::to_value(&update).unwrap();
    assert_eq!(body, serde_json::json!({}));

    let update = TaskUpdate {
        status: Some(TaskStatus::InProgress),
        completed_at: None,
    };
    let body = serde_json::to_value(&update).unwrap();
    assert_eq!(body["status"], "inProgress");
    assert!(body.get("completedAt").is_none());
}

#[test]
fn test_points_table() {
    assert_eq!(Difficulty::Easy.points(), 50);
    assert_eq!(Difficulty::Medium.points(), 100);
    assert_eq!(Difficulty::Hard.points(), 200);
}

#[test]
fn test_timeframe_parsing() {
    assert_eq!("week".parse::<Timeframe>().unwrap(), Timeframe::Week);
    assert_eq!("Month".parse::<Timeframe>().unwrap(), Timeframe::Month);
    assert_eq!("all".parse::<Timeframe>().unwrap(), Timeframe::AllTime);
    assert!("fortnight".parse::<Timeframe>().is_err());
}

#[test]
fn test_report_filters() {
    let reports = sample_reports();

    let by_search = filter_reports(&reports, Some("performance"), None, None);
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].name, "Team Performance Report");

    let by_team = filter_reports(&reports, None, Some("Development"), None);
    assert!(by_team.iter().all(|r| r.team == "Development"));
    assert!(!by_team.is_empty());

    let by_timeframe = filter_reports(&reports, None, None, Some("Weekly"));
    assert!(by_timeframe.iter().all(|r| r.timeframe == "Weekly"));

    let nothing = filter_reports(&reports, Some("nonexistent"), None, None);
    assert!(nothing.is_empty());

    let unfiltered = filter_reports(&reports, None, None, None);
    assert_eq!(unfiltered.len(), reports.len());
}
