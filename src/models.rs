use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A unit of assigned work with lifecycle pending -> completed.
///
/// The `id` is the remote store's record key and is never part of the
/// serialized body; it is attached when a listing is decoded.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Record key assigned by the remote store.
    #[serde(skip)]
    pub id: String,
    /// Short name of the task.
    pub task_name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Name of the employee the task is assigned to.
    pub assigned_to: String,
    /// Name of the employer who assigned the task.
    pub assigned_by: String,
    /// Work category.
    #[serde(default)]
    pub task_type: TaskType,
    /// Difficulty level, drives the point reward.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Scheduling priority.
    #[serde(default)]
    pub priority: Priority,
    /// Estimated effort in hours.
    #[serde(default)]
    pub estimated_time: f64,
    /// Lifecycle status.
    #[serde(default)]
    pub status: TaskStatus,
    /// When the task was assigned (RFC 3339, UTC).
    pub timestamp: DateTime<Utc>,
    /// When the task was completed, if it has been.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// An append-only reward record tied to a completed task.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PointEntry {
    pub user_name: String,
    pub points: u32,
    pub task_id: String,
    pub task_name: String,
    pub timestamp: DateTime<Utc>,
}

/// A registered team member.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub name: String,
    pub department: String,
    pub email: String,
    pub join_date: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskType {
    #[default]
    #[serde(rename = "BAU")]
    Bau,
    AdHoc,
    ProjectBased,
}

impl TaskType {
    pub fn label(&self) -> &'static str {
        match self {
            TaskType::Bau => "BAU",
            TaskType::AdHoc => "Ad Hoc",
            TaskType::ProjectBased => "Project-Based",
        }
    }
}

impl std::str::FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bau" => Ok(TaskType::Bau),
            "adhoc" | "ad-hoc" => Ok(TaskType::AdHoc),
            "project" | "project-based" | "projectbased" => Ok(TaskType::ProjectBased),
            other => Err(format!(
                "unknown task type '{}' (expected bau, adhoc or project)",
                other
            )),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Fixed difficulty -> points table.
    pub fn points(&self) -> u32 {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Medium => 100,
            Difficulty::Hard => 200,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{}' (expected easy, medium or hard)",
                other
            )),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(format!(
                "unknown priority '{}' (expected low, medium, high or urgent)",
                other
            )),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

/// Relative date filter applied to point entries for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    #[default]
    Week,
    Month,
    Quarter,
    AllTime,
}

impl Timeframe {
    /// Number of trailing days the window covers, `None` for all time.
    pub fn days(&self) -> Option<i64> {
        match self {
            Timeframe::Week => Some(7),
            Timeframe::Month => Some(30),
            Timeframe::Quarter => Some(90),
            Timeframe::AllTime => None,
        }
    }

    /// Cutoff instant for the window ending at `now`.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.days().map(|d| now - Duration::days(d))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Week => "Last Week",
            Timeframe::Month => "Last Month",
            Timeframe::Quarter => "Last Quarter",
            Timeframe::AllTime => "All Time",
        }
    }
}

impl std::str::FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Timeframe::Week),
            "month" => Ok(Timeframe::Month),
            "quarter" => Ok(Timeframe::Quarter),
            "all" | "alltime" | "all-time" => Ok(Timeframe::AllTime),
            other => Err(format!(
                "unknown timeframe '{}' (expected week, month, quarter or all)",
                other
            )),
        }
    }
}
