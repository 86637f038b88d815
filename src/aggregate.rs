//! Pure aggregation over task/point snapshots.
//!
//! Every function takes the full current snapshot plus an explicit clock
//! value and returns derived view data. Nothing here touches the network.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{PointEntry, Task, TaskStatus, TaskType, Timeframe};

/// One leaderboard row: a user's point total within the active window.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub user_name: String,
    pub points: u32,
    pub completed_tasks: usize,
}

/// Snapshot-level task counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskStats {
    pub completed: usize,
    pub pending: usize,
    /// Mean estimated hours across all tasks, 0 when there are none.
    pub avg_time: f64,
    /// completed / (completed + pending) * 100, 0 when nothing is completed.
    pub efficiency: f64,
}

/// Share of one task type in the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSlice {
    pub task_type: TaskType,
    pub count: usize,
    pub share: f64,
}

/// Completed vs pending counts for one trailing calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub label: String,
    pub completed: usize,
    pub pending: usize,
}

/// A team challenge with progress derived from the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeProgress {
    pub title: &'static str,
    pub description: &'static str,
    pub reward: &'static str,
    pub achieved: u32,
    pub target: u32,
    /// Percentage toward the target, clamped to 100.
    pub progress: f64,
}

/// Ranks users by point totals within the timeframe window.
///
/// Grouping preserves first-seen order, so equal totals keep the order in
/// which users first appear in the point log. Truncated to the top five.
pub fn leaderboard(
    points: &[PointEntry],
    tasks: &[Task],
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Vec<LeaderboardEntry> {
    let cutoff = timeframe.cutoff(now);
    let mut totals: Vec<(String, u32)> = Vec::new();
    for entry in points {
        if let Some(cutoff) = cutoff {
            if entry.timestamp < cutoff {
                continue;
            }
        }
        match totals.iter_mut().find(|(name, _)| *name == entry.user_name) {
            Some((_, total)) => *total += entry.points,
            None => totals.push((entry.user_name.clone(), entry.points)),
        }
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
        .into_iter()
        .take(5)
        .map(|(user_name, points)| {
            let completed_tasks = tasks
                .iter()
                .filter(|t| t.assigned_to == user_name && t.status == TaskStatus::Completed)
                .count();
            LeaderboardEntry {
                user_name,
                points,
                completed_tasks,
            }
        })
        .collect()
}

pub fn task_stats(tasks: &[Task]) -> TaskStats {
    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    let pending = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Pending)
        .count();
    let avg_time = if tasks.is_empty() {
        0.0
    } else {
        tasks.iter().map(|t| t.estimated_time).sum::<f64>() / tasks.len() as f64
    };
    let efficiency = if completed > 0 {
        completed as f64 / (completed + pending) as f64 * 100.0
    } else {
        0.0
    };
    TaskStats {
        completed,
        pending,
        avg_time,
        efficiency,
    }
}

/// Groups tasks by type into percentage shares. Empty when there are no
/// tasks, so an empty snapshot never produces NaN shares.
pub fn task_distribution(tasks: &[Task]) -> Vec<DistributionSlice> {
    if tasks.is_empty() {
        return Vec::new();
    }
    let total = tasks.len() as f64;
    [TaskType::Bau, TaskType::AdHoc, TaskType::ProjectBased]
        .into_iter()
        .filter_map(|task_type| {
            let count = tasks.iter().filter(|t| t.task_type == task_type).count();
            if count == 0 {
                return None;
            }
            Some(DistributionSlice {
                task_type,
                count,
                share: count as f64 / total * 100.0,
            })
        })
        .collect()
}

/// Completed vs pending counts for each of the window's trailing days,
/// matched on the calendar date of the task's assignment timestamp.
/// Oldest day first. All-time falls back to the quarter window.
pub fn performance_trend(
    tasks: &[Task],
    timeframe: Timeframe,
    today: NaiveDate,
) -> Vec<DayActivity> {
    let days = timeframe.days().unwrap_or(90);
    let mut trend = Vec::with_capacity(days as usize);
    for offset in (0..days).rev() {
        let date = today - Duration::days(offset);
        let label = match offset {
            0 => "Today".to_string(),
            1 => "Yesterday".to_string(),
            _ => date.format("%b %-d").to_string(),
        };
        let day_tasks: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.timestamp.date_naive() == date)
            .collect();
        trend.push(DayActivity {
            date,
            label,
            completed: day_tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count(),
            pending: day_tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Pending)
                .count(),
        });
    }
    trend
}

/// Sum of a user's points across all time.
pub fn user_points_total(points: &[PointEntry], user: &str) -> u32 {
    points
        .iter()
        .filter(|p| p.user_name == user)
        .map(|p| p.points)
        .sum()
}

/// Sum of a user's points within the timeframe window ending at `now`.
pub fn user_points_in_window(
    points: &[PointEntry],
    user: &str,
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> u32 {
    let cutoff = timeframe.cutoff(now);
    points
        .iter()
        .filter(|p| p.user_name == user)
        .filter(|p| cutoff.map_or(true, |c| p.timestamp >= c))
        .map(|p| p.points)
        .sum()
}

/// Count of consecutive calendar days with at least one point entry,
/// ending at the user's most recent entry. Multiple entries on one day
/// count once; the first gap breaks the run.
pub fn streak(points: &[PointEntry], user: &str) -> u32 {
    let mut dates: Vec<NaiveDate> = points
        .iter()
        .filter(|p| p.user_name == user)
        .map(|p| p.timestamp.date_naive())
        .collect();
    dates.sort_unstable();
    dates.dedup();
    dates.reverse();

    let mut run = 0u32;
    let mut expected: Option<NaiveDate> = None;
    for date in dates {
        match expected {
            Some(next) if date != next => break,
            _ => {}
        }
        run += 1;
        expected = Some(date - Duration::days(1));
    }
    run
}

/// Progress on the fixed team challenges, derived from the last week of
/// activity. Completion time falls back to the assignment timestamp for
/// records written before `completedAt` existed.
pub fn challenge_progress(
    tasks: &[Task],
    points: &[PointEntry],
    now: DateTime<Utc>,
) -> Vec<ChallengeProgress> {
    let cutoff = now - Duration::days(7);
    let completed_this_week = |filter: &dyn Fn(&Task) -> bool| {
        tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .filter(|t| t.completed_at.unwrap_or(t.timestamp) >= cutoff)
            .filter(|t| filter(t))
            .count() as u32
    };

    let team_completed = completed_this_week(&|_| true);
    let ad_hoc_completed = completed_this_week(&|t: &Task| t.task_type == TaskType::AdHoc);
    let team_points: u32 = points
        .iter()
        .filter(|p| p.timestamp >= cutoff)
        .map(|p| p.points)
        .sum();

    let challenge = |title, description, reward, achieved: u32, target: u32| ChallengeProgress {
        title,
        description,
        reward,
        achieved,
        target,
        progress: (achieved as f64 / target as f64 * 100.0).min(100.0),
    };

    vec![
        challenge(
            "Task Master Challenge",
            "Complete 50 tasks as a team this week",
            "500 team points",
            team_completed,
            50,
        ),
        challenge(
            "Ad Hoc Heroes",
            "Handle 20 ad hoc requests this week",
            "Team lunch voucher",
            ad_hoc_completed,
            20,
        ),
        challenge(
            "Point Surge",
            "Earn 5000 team points this week",
            "Extra day off",
            team_points,
            5000,
        ),
    ]
}
