use chrono::{Duration, Utc};
use workpulse::models::{PointEntry, Priority, Task, TaskStatus, TaskType};
use workpulse::notify::{derive_notifications, NotificationKind};

fn pending_task(name: &str, user: &str, priority: Priority, days_ago: i64) -> Task {
    Task {
        id: format!("task-{}", name),
        task_name: name.into(),
        description: String::new(),
        assigned_to: user.into(),
        assigned_by: "Boss".into(),
        task_type: TaskType::Bau,
        difficulty: Default::default(),
        priority,
        estimated_time: 1.0,
        status: TaskStatus::Pending,
        timestamp: Utc::now() - Duration::days(days_ago),
        completed_at: None,
    }
}

fn point(user: &str, points: u32, days_ago: i64) -> PointEntry {
    PointEntry {
        user_name: user.into(),
        points,
        task_id: "t".into(),
        task_name: "Task".into(),
        timestamp: Utc::now() - Duration::days(days_ago),
    }
}

#[test]
fn test_urgent_backlog_alert() {
    let tasks = vec![
        pending_task("fire", "Alice", Priority::Urgent, 0),
        pending_task("more fire", "Alice", Priority::Urgent, 1),
        pending_task("calm", "Alice", Priority::Low, 0),
    ];
    let notifications = derive_notifications("Alice", &tasks, &[], Utc::now());
    let alert = notifications
        .iter()
        .find(|n| n.title == "Urgent backlog")
        .expect("urgent backlog alert");
    assert_eq!(alert.kind, NotificationKind::Alert);
    assert!(alert.message.contains("2 urgent tasks"));
}

#[test]
fn test_no_urgent_alert_for_other_users() {
    let tasks = vec![pending_task("fire", "Bob", Priority::Urgent, 0)];
    let notifications = derive_notifications("Alice", &tasks, &[], Utc::now());
    assert!(notifications.iter().all(|n| n.title != "Urgent backlog"));
}

#[test]
fn test_stale_task_reminder() {
    let tasks = vec![
        pending_task("fresh", "Alice", Priority::Medium, 1),
        pending_task("forgotten", "Alice", Priority::Medium, 5),
    ];
    let notifications = derive_notifications("Alice", &tasks, &[], Utc::now());
    let reminder = notifications
        .iter()
        .find(|n| n.kind == NotificationKind::Reminder)
        .expect("stale task reminder");
    assert!(reminder.message.contains("forgotten"));
}

#[test]
fn test_high_weekly_points_achievement() {
    let points = vec![point("Alice", 300, 1), point("Alice", 300, 2)];
    let notifications = derive_notifications("Alice", &[], &points, Utc::now());
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Achievement && n.message.contains("600 points")));
}

#[test]
fn test_low_weekly_points_alert_needs_history() {
    // A user with history but a quiet week gets the alert
    let points = vec![point("Alice", 100, 40)];
    let notifications = derive_notifications("Alice", &[], &points, Utc::now());
    assert!(notifications
        .iter()
        .any(|n| n.title == "Productivity alert"));

    // A brand new user does not
    let notifications = derive_notifications("Newcomer", &[], &points, Utc::now());
    assert!(notifications
        .iter()
        .all(|n| n.title != "Productivity alert"));
}

#[test]
fn test_streak_achievement() {
    // 100 points on each of three consecutive days: streak notification,
    // weekly total of 300 sits between the two point thresholds
    let points = vec![
        point("Alice", 100, 0),
        point("Alice", 100, 1),
        point("Alice", 100, 2),
    ];
    let notifications = derive_notifications("Alice", &[], &points, Utc::now());
    assert!(notifications
        .iter()
        .any(|n| n.title == "On a roll!" && n.message.contains("3 consecutive days")));
    assert!(notifications.iter().all(|n| n.title != "Productivity alert"));
}

#[test]
fn test_quiet_snapshot_derives_nothing() {
    let notifications = derive_notifications("Alice", &[], &[], Utc::now());
    assert!(notifications.is_empty());
}
