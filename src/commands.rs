use chrono::Utc;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::aggregate::{
    challenge_progress, leaderboard, performance_trend, streak, task_distribution, task_stats,
};
use crate::models::{
    Difficulty, Employee, PointEntry, Priority, Task, TaskStatus, TaskType, Timeframe,
};
use crate::notify::{derive_notifications, NotificationKind};
use crate::reports::{filter_reports, sample_reports};
use crate::store::{RemoteStore, StoreError, TaskUpdate};

/// What a completed task earned, for the caller to report.
pub struct CompletionReceipt {
    pub task_name: String,
    pub user_name: String,
    pub points: u32,
}

/// Writes a new pending task to the store and returns its assigned id.
/// Shared by the CLI command and the TUI assign wizard.
#[allow(clippy::too_many_arguments)]
pub fn assign_task(
    store: &RemoteStore,
    task_name: String,
    description: Option<String>,
    assigned_to: String,
    assigned_by: String,
    task_type: TaskType,
    difficulty: Difficulty,
    priority: Priority,
    estimated_time: f64,
) -> Result<String, StoreError> {
    let task = Task {
        id: String::new(),
        task_name,
        description: description.unwrap_or_default(),
        assigned_to,
        assigned_by,
        task_type,
        difficulty,
        priority,
        estimated_time: estimated_time.max(0.0),
        status: TaskStatus::Pending,
        timestamp: Utc::now(),
        completed_at: None,
    };
    store.create_task(&task)
}

/// Transitions a task to completed and appends one point entry for the
/// assignee, valued by the difficulty table.
///
/// A task that is already completed is rejected, so repeating the action
/// cannot double-award points. Two racing completes can still both pass the
/// guard; the store itself enforces nothing.
pub fn complete_task(store: &RemoteStore, id: &str) -> Result<CompletionReceipt, StoreError> {
    let tasks = store.list_tasks()?;
    let task = tasks
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
    if task.status == TaskStatus::Completed {
        return Err(StoreError::AlreadyCompleted(id.to_string()));
    }

    let now = Utc::now();
    store.update_task(
        &task.id,
        &TaskUpdate {
            status: Some(TaskStatus::Completed),
            completed_at: Some(now),
        },
    )?;

    let earned = task.difficulty.points();
    store.add_points(&PointEntry {
        user_name: task.assigned_to.clone(),
        points: earned,
        task_id: task.id.clone(),
        task_name: task.task_name.clone(),
        timestamp: now,
    })?;

    Ok(CompletionReceipt {
        task_name: task.task_name.clone(),
        user_name: task.assigned_to.clone(),
        points: earned,
    })
}

/// Assigns a new task. The record lands in the store with `pending` status
/// and the current instant as its assignment timestamp.
#[allow(clippy::too_many_arguments)]
pub fn cmd_assign(
    store: &RemoteStore,
    task_name: String,
    description: Option<String>,
    assigned_to: String,
    assigned_by: String,
    task_type: TaskType,
    difficulty: Difficulty,
    priority: Priority,
    estimated_time: f64,
) -> Result<(), StoreError> {
    let name = task_name.clone();
    let to = assigned_to.clone();
    let id = assign_task(
        store,
        task_name,
        description,
        assigned_to,
        assigned_by,
        task_type,
        difficulty,
        priority,
        estimated_time,
    )?;
    println!("Task '{}' assigned to {} (id = {})", name, to, id);
    Ok(())
}

/// Lists tasks in a formatted table, optionally narrowed to one assignee.
/// Hides completed tasks unless `all` is set.
pub fn cmd_tasks(store: &RemoteStore, user: Option<String>, all: bool) -> Result<(), StoreError> {
    let mut tasks = store.list_tasks()?;
    if let Some(user) = &user {
        tasks.retain(|t| &t.assigned_to == user);
    }
    if !all {
        tasks.retain(|t| t.status != TaskStatus::Completed);
    }
    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Task").add_attribute(Attribute::Bold),
            Cell::new("Assigned To").add_attribute(Attribute::Bold),
            Cell::new("By").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Difficulty").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Est (h)").add_attribute(Attribute::Bold),
            Cell::new("Assigned").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for t in tasks {
        let priority_color = match t.priority {
            Priority::Low => Color::Green,
            Priority::Medium => Color::Blue,
            Priority::High => Color::Yellow,
            Priority::Urgent => Color::Red,
        };
        let status_color = match t.status {
            TaskStatus::Completed => Color::Green,
            TaskStatus::InProgress => Color::Cyan,
            TaskStatus::Pending => Color::Yellow,
        };
        table.add_row(vec![
            Cell::new(&t.id),
            Cell::new(&t.task_name),
            Cell::new(&t.assigned_to),
            Cell::new(&t.assigned_by),
            Cell::new(t.task_type.label()),
            Cell::new(t.difficulty.label()),
            Cell::new(t.priority.label()).fg(priority_color),
            Cell::new(format!("{:.1}", t.estimated_time)),
            Cell::new(t.timestamp.format("%Y-%m-%d").to_string()),
            Cell::new(t.status.label()).fg(status_color),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Marks a task as complete and reports the points awarded.
pub fn cmd_complete(store: &RemoteStore, id: &str) -> Result<(), StoreError> {
    let receipt = complete_task(store, id)?;
    println!(
        "Task '{}' completed! {} earned {} points.",
        receipt.task_name, receipt.user_name, receipt.points
    );
    Ok(())
}

/// Registers a new employee. The list is append-only; no update or delete.
pub fn cmd_employee_add(
    store: &RemoteStore,
    name: String,
    department: String,
    email: String,
) -> Result<(), StoreError> {
    let employee = Employee {
        name,
        department,
        email,
        join_date: Utc::now().date_naive(),
    };
    store.add_employee(&employee)?;
    println!("Employee '{}' added to {}.", employee.name, employee.department);
    Ok(())
}

pub fn cmd_employee_list(store: &RemoteStore) -> Result<(), StoreError> {
    let employees = store.list_employees()?;
    if employees.is_empty() {
        println!("No employees registered.");
        return Ok(());
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Name", "Department", "Email", "Joined"]);
    for e in employees {
        table.add_row(vec![e.name, e.department, e.email, e.join_date.to_string()]);
    }
    println!("{table}");
    Ok(())
}

/// Prints the top performers for the selected timeframe window.
pub fn cmd_leaderboard(store: &RemoteStore, timeframe: Timeframe) -> Result<(), StoreError> {
    let points = store.list_points()?;
    let tasks = store.list_tasks()?;
    let entries = leaderboard(&points, &tasks, timeframe, Utc::now());
    if entries.is_empty() {
        println!("No points recorded for {}.", timeframe.label().to_lowercase());
        return Ok(());
    }

    println!("Top Performers - {}", timeframe.label());
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Employee").add_attribute(Attribute::Bold),
        Cell::new("Points").add_attribute(Attribute::Bold),
        Cell::new("Tasks Completed").add_attribute(Attribute::Bold),
    ]);
    for (rank, entry) in entries.iter().enumerate() {
        let rank_color = match rank {
            0 => Color::Yellow,
            1 => Color::Grey,
            2 => Color::DarkYellow,
            _ => Color::Reset,
        };
        table.add_row(vec![
            Cell::new(rank + 1).fg(rank_color),
            Cell::new(&entry.user_name),
            Cell::new(entry.points),
            Cell::new(entry.completed_tasks),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Analytics panel: quick stats, task distribution, performance trend and
/// the top-performer table, all derived from one snapshot fetch.
pub fn cmd_analytics(store: &RemoteStore, timeframe: Timeframe) -> Result<(), StoreError> {
    let tasks = store.list_tasks()?;
    let points = store.list_points()?;
    let now = Utc::now();

    let stats = task_stats(&tasks);
    println!("Team Analytics - {}", timeframe.label());
    println!(
        "  Completed: {}   Pending: {}   Avg. estimate: {:.1}h   Efficiency: {:.1}%",
        stats.completed, stats.pending, stats.avg_time, stats.efficiency
    );
    println!();

    let distribution = task_distribution(&tasks);
    if distribution.is_empty() {
        println!("No tasks yet; distribution unavailable.");
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Task Type", "Count", "Share"]);
        for slice in &distribution {
            table.add_row(vec![
                slice.task_type.label().to_string(),
                slice.count.to_string(),
                format!("{:.1}%", slice.share),
            ]);
        }
        println!("{table}");
    }
    println!();

    let trend = performance_trend(&tasks, timeframe, now.date_naive());
    // Quiet days clutter long windows; show only days with activity.
    let active: Vec<_> = trend
        .iter()
        .filter(|d| d.completed + d.pending > 0)
        .collect();
    if active.is_empty() {
        println!("No task activity in this window.");
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Day", "Completed", "Pending"]);
        for day in active {
            table.add_row(vec![
                day.label.clone(),
                day.completed.to_string(),
                day.pending.to_string(),
            ]);
        }
        println!("{table}");
    }
    println!();

    let performers = leaderboard(&points, &tasks, timeframe, now);
    if !performers.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Employee", "Points", "Tasks Completed"]);
        for entry in performers {
            table.add_row(vec![
                entry.user_name,
                entry.points.to_string(),
                entry.completed_tasks.to_string(),
            ]);
        }
        println!("{table}");
    }
    Ok(())
}

/// Prints a user's current daily completion streak.
pub fn cmd_streak(store: &RemoteStore, user: &str) -> Result<(), StoreError> {
    let points = store.list_points()?;
    let run = streak(&points, user);
    match run {
        0 => println!("{} has no completion streak yet.", user),
        1 => println!("{} is on a 1-day streak.", user),
        n => println!("{} is on a {}-day streak!", user, n),
    }
    Ok(())
}

/// Evaluates the notification rules for one user and prints the results.
pub fn cmd_notifications(store: &RemoteStore, user: &str) -> Result<(), StoreError> {
    let tasks = store.list_tasks()?;
    let points = store.list_points()?;
    let notifications = derive_notifications(user, &tasks, &points, Utc::now());
    if notifications.is_empty() {
        println!("No notifications for {}.", user);
        return Ok(());
    }
    for n in notifications {
        let color = match n.kind {
            NotificationKind::Achievement => Color::Green,
            NotificationKind::Reminder => Color::Blue,
            NotificationKind::Alert => Color::Red,
        };
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.add_row(vec![
            Cell::new(n.kind.label()).fg(color).add_attribute(Attribute::Bold),
            Cell::new(format!("{}\n{}", n.title, n.message)),
        ]);
        println!("{table}");
    }
    Ok(())
}

/// Team challenge progress bars, text edition.
pub fn cmd_challenges(store: &RemoteStore) -> Result<(), StoreError> {
    let tasks = store.list_tasks()?;
    let points = store.list_points()?;
    for c in challenge_progress(&tasks, &points, Utc::now()) {
        let filled = (c.progress / 10.0).round() as usize;
        let bar: String = "#".repeat(filled) + &"-".repeat(10 - filled.min(10));
        println!("{} - {}", c.title, c.description);
        println!(
            "  [{}] {:.0}% ({}/{})   Reward: {}",
            bar, c.progress, c.achieved, c.target, c.reward
        );
    }
    Ok(())
}

/// Reports table over the built-in sample data.
pub fn cmd_reports(search: Option<String>, team: Option<String>, timeframe: Option<String>) {
    let reports = sample_reports();
    let filtered = filter_reports(
        &reports,
        search.as_deref(),
        team.as_deref(),
        timeframe.as_deref(),
    );
    if filtered.is_empty() {
        println!("No reports match the given filters.");
        return;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Report Name",
        "Team",
        "Task Type",
        "Completion Rate",
        "Timeframe",
        "Date",
    ]);
    for r in filtered {
        table.add_row(vec![
            r.name.to_string(),
            r.team.to_string(),
            r.task_type.to_string(),
            format!("{}%", r.completion_rate),
            r.timeframe.to_string(),
            r.date.to_string(),
        ]);
    }
    println!("{table}");
}
