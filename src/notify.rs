//! Stateless notification rules over a user's tasks and points.
//!
//! Each rule yields zero or one notification per evaluation; nothing is
//! persisted, so the same snapshot always derives the same set.

use chrono::{DateTime, Duration, Utc};

use crate::aggregate::{streak, user_points_in_window};
use crate::models::{PointEntry, Priority, Task, TaskStatus, Timeframe};

/// Weekly point total below this triggers a productivity alert.
const LOW_WEEKLY_POINTS: u32 = 200;
/// Weekly point total at or above this unlocks an achievement.
const HIGH_WEEKLY_POINTS: u32 = 500;
/// Streak length that unlocks an achievement.
const STREAK_THRESHOLD: u32 = 3;
/// A pending task older than this counts as an approaching deadline.
const STALE_TASK_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Achievement,
    Reminder,
    Alert,
}

impl NotificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Achievement => "achievement",
            NotificationKind::Reminder => "reminder",
            NotificationKind::Alert => "alert",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

/// Evaluates every rule against the user's slice of the snapshot.
pub fn derive_notifications(
    user: &str,
    tasks: &[Task],
    points: &[PointEntry],
    now: DateTime<Utc>,
) -> Vec<Notification> {
    let mut notifications = Vec::new();
    let pending: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.assigned_to == user && t.status == TaskStatus::Pending)
        .collect();

    let urgent = pending
        .iter()
        .filter(|t| t.priority == Priority::Urgent)
        .count();
    if urgent > 0 {
        notifications.push(Notification {
            kind: NotificationKind::Alert,
            title: "Urgent backlog".to_string(),
            message: format!(
                "You have {} urgent task{} waiting. Tackle those first!",
                urgent,
                if urgent == 1 { "" } else { "s" }
            ),
        });
    }

    let stale_cutoff = now - Duration::days(STALE_TASK_DAYS);
    if let Some(oldest) = pending
        .iter()
        .filter(|t| t.timestamp < stale_cutoff)
        .min_by_key(|t| t.timestamp)
    {
        notifications.push(Notification {
            kind: NotificationKind::Reminder,
            title: "Task reminder".to_string(),
            message: format!(
                "'{}' has been pending since {}. Don't let it slip.",
                oldest.task_name,
                oldest.timestamp.format("%Y-%m-%d")
            ),
        });
    }

    let weekly = user_points_in_window(points, user, Timeframe::Week, now);
    let has_history = points.iter().any(|p| p.user_name == user);
    if weekly >= HIGH_WEEKLY_POINTS {
        notifications.push(Notification {
            kind: NotificationKind::Achievement,
            title: "Achievement unlocked!".to_string(),
            message: format!("You've earned {} points this week. Keep up the great work!", weekly),
        });
    } else if has_history && weekly < LOW_WEEKLY_POINTS {
        notifications.push(Notification {
            kind: NotificationKind::Alert,
            title: "Productivity alert".to_string(),
            message: format!(
                "Only {} points this week. Your completion rate has decreased. Need help?",
                weekly
            ),
        });
    }

    let current_streak = streak(points, user);
    if current_streak >= STREAK_THRESHOLD {
        notifications.push(Notification {
            kind: NotificationKind::Achievement,
            title: "On a roll!".to_string(),
            message: format!(
                "{} consecutive days with completed tasks. Don't break the chain!",
                current_streak
            ),
        });
    }

    notifications
}
