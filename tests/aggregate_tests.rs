use chrono::{Duration, TimeZone, Utc};
use workpulse::aggregate::*;
use workpulse::models::{PointEntry, Task, TaskStatus, TaskType, Timeframe};

fn task(name: &str, assigned_to: &str, status: TaskStatus, task_type: TaskType, days_ago: i64) -> Task {
    let now = Utc::now();
    Task {
        id: format!("task-{}", name),
        task_name: name.into(),
        description: String::new(),
        assigned_to: assigned_to.into(),
        assigned_by: "Boss".into(),
        task_type,
        difficulty: Default::default(),
        priority: Default::default(),
        estimated_time: 2.0,
        status,
        timestamp: now - Duration::days(days_ago),
        completed_at: if status == TaskStatus::Completed {
            Some(now - Duration::days(days_ago))
        } else {
            None
        },
    }
}

fn point(user: &str, points: u32, days_ago: i64) -> PointEntry {
    PointEntry {
        user_name: user.into(),
        points,
        task_id: "t1".into(),
        task_name: "Task".into(),
        timestamp: Utc::now() - Duration::days(days_ago),
    }
}

#[test]
fn test_leaderboard_sums_within_window() {
    let now = Utc::now();
    let points = vec![
        point("Alice", 100, 1),
        point("Alice", 50, 3),
        point("Alice", 200, 10), // outside week window
        point("Bob", 120, 2),
    ];

    let week = leaderboard(&points, &[], Timeframe::Week, now);
    assert_eq!(week.len(), 2);
    assert_eq!(week[0].user_name, "Alice");
    assert_eq!(week[0].points, 150);
    assert_eq!(week[1].points, 120);

    let month = leaderboard(&points, &[], Timeframe::Month, now);
    assert_eq!(month[0].points, 350);

    let all = leaderboard(&points, &[], Timeframe::AllTime, now);
    assert_eq!(all[0].points, 350);
}

#[test]
fn test_leaderboard_top_five_and_tie_order() {
    let now = Utc::now();
    let mut points = Vec::new();
    for (i, user) in ["A", "B", "C", "D", "E", "F"].iter().enumerate() {
        points.push(point(user, 100 - (i as u32 * 10), 1));
    }
    let board = leaderboard(&points, &[], Timeframe::Week, now);
    assert_eq!(board.len(), 5);
    assert_eq!(board[0].user_name, "A");
    assert_eq!(board[4].user_name, "E");

    // Equal totals keep first-seen grouping order
    let tied = vec![point("First", 100, 1), point("Second", 100, 2)];
    let board = leaderboard(&tied, &[], Timeframe::Week, now);
    assert_eq!(board[0].user_name, "First");
    assert_eq!(board[1].user_name, "Second");
}

#[test]
fn test_leaderboard_counts_completed_tasks() {
    let now = Utc::now();
    let tasks = vec![
        task("a", "Alice", TaskStatus::Completed, TaskType::Bau, 1),
        task("b", "Alice", TaskStatus::Completed, TaskType::Bau, 2),
        task("c", "Alice", TaskStatus::Pending, TaskType::Bau, 1),
        task("d", "Bob", TaskStatus::Completed, TaskType::Bau, 1),
    ];
    let points = vec![point("Alice", 100, 1)];
    let board = leaderboard(&points, &tasks, Timeframe::Week, now);
    assert_eq!(board[0].completed_tasks, 2);
}

#[test]
fn test_task_stats_efficiency() {
    let tasks = vec![
        task("a", "Alice", TaskStatus::Completed, TaskType::Bau, 1),
        task("b", "Alice", TaskStatus::Completed, TaskType::Bau, 1),
        task("c", "Alice", TaskStatus::Completed, TaskType::Bau, 1),
        task("d", "Alice", TaskStatus::Pending, TaskType::Bau, 1),
    ];
    let stats = task_stats(&tasks);
    assert_eq!(stats.completed, 3);
    assert_eq!(stats.pending, 1);
    assert!((stats.efficiency - 75.0).abs() < f64::EPSILON);
    assert!((stats.avg_time - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_task_stats_empty() {
    let stats = task_stats(&[]);
    assert_eq!(stats.completed, 0);
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.avg_time, 0.0);
    assert_eq!(stats.efficiency, 0.0);
}

#[test]
fn test_distribution_shares_sum_to_100() {
    let tasks = vec![
        task("a", "Alice", TaskStatus::Pending, TaskType::Bau, 1),
        task("b", "Alice", TaskStatus::Pending, TaskType::Bau, 1),
        task("c", "Alice", TaskStatus::Pending, TaskType::AdHoc, 1),
        task("d", "Alice", TaskStatus::Pending, TaskType::ProjectBased, 1),
    ];
    let dist = task_distribution(&tasks);
    assert_eq!(dist.len(), 3);
    let total: f64 = dist.iter().map(|s| s.share).sum();
    assert!((total - 100.0).abs() < 1e-9);
    assert!((dist[0].share - 50.0).abs() < 1e-9);
}

#[test]
fn test_distribution_empty_when_no_tasks() {
    assert!(task_distribution(&[]).is_empty());
}

#[test]
fn test_performance_trend_days_and_order() {
    let today = Utc::now().date_naive();
    let tasks = vec![
        task("a", "Alice", TaskStatus::Completed, TaskType::Bau, 0),
        task("b", "Alice", TaskStatus::Pending, TaskType::Bau, 0),
        task("c", "Alice", TaskStatus::Pending, TaskType::Bau, 1),
    ];
    let trend = performance_trend(&tasks, Timeframe::Week, today);
    assert_eq!(trend.len(), 7);
    // Oldest first, today last
    assert_eq!(trend[6].label, "Today");
    assert_eq!(trend[6].completed, 1);
    assert_eq!(trend[6].pending, 1);
    assert_eq!(trend[5].label, "Yesterday");
    assert_eq!(trend[5].pending, 1);
    assert_eq!(trend[0].date, today - Duration::days(6));
}

#[test]
fn test_streak_consecutive_days() {
    let base = Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap();
    let entry = |days_back: i64| PointEntry {
        user_name: "Alice".into(),
        points: 50,
        task_id: "t".into(),
        task_name: "Task".into(),
        timestamp: base - Duration::days(days_back),
    };

    // Mar 3, Mar 2, Mar 1 -> streak of 3
    let points = vec![entry(0), entry(1), entry(2)];
    assert_eq!(streak(&points, "Alice"), 3);

    // Mar 3, Mar 1 -> gap breaks the run
    let points = vec![entry(0), entry(2)];
    assert_eq!(streak(&points, "Alice"), 1);

    // Two entries on the same day count once
    let points = vec![entry(0), entry(0), entry(1)];
    assert_eq!(streak(&points, "Alice"), 2);

    assert_eq!(streak(&points, "Bob"), 0);
}

#[test]
fn test_user_points_totals() {
    let now = Utc::now();
    let points = vec![
        point("Alice", 100, 1),
        point("Alice", 200, 20),
        point("Bob", 50, 1),
    ];
    assert_eq!(user_points_total(&points, "Alice"), 300);
    assert_eq!(
        user_points_in_window(&points, "Alice", Timeframe::Week, now),
        100
    );
    assert_eq!(
        user_points_in_window(&points, "Alice", Timeframe::AllTime, now),
        300
    );
}

#[test]
fn test_challenge_progress_clamped() {
    let now = Utc::now();
    let mut tasks = Vec::new();
    for i in 0..60 {
        tasks.push(task(
            &format!("t{}", i),
            "Alice",
            TaskStatus::Completed,
            TaskType::Bau,
            1,
        ));
    }
    let challenges = challenge_progress(&tasks, &[], now);
    let master = &challenges[0];
    assert_eq!(master.achieved, 60);
    assert_eq!(master.target, 50);
    assert!((master.progress - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_challenge_progress_counts_week_only() {
    let now = Utc::now();
    let tasks = vec![
        task("recent", "Alice", TaskStatus::Completed, TaskType::AdHoc, 1),
        task("old", "Alice", TaskStatus::Completed, TaskType::AdHoc, 10),
    ];
    let points = vec![point("Alice", 500, 1), point("Alice", 500, 10)];
    let challenges = challenge_progress(&tasks, &points, now);
    assert_eq!(challenges[0].achieved, 1); // team completions this week
    assert_eq!(challenges[1].achieved, 1); // ad hoc this week
    assert_eq!(challenges[2].achieved, 500); // points this week
}
