//! # Workpulse
//!
//! A terminal client for a team task & productivity tracker. Employees list
//! and complete assigned tasks, employers assign tasks and view analytics,
//! and a leaderboard/notification layer gamifies completion.
//!
//! All state lives in a hosted JSON database reached over plain HTTP. Set
//! `WORKPULSE_DB` to point the client at your own database URL.
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! ```bash
//! workpulse ui --user "Sarah Johnson"
//! ```
//!
//! **Key Bindings**
//! *   `q`: Quit
//! *   `v`: Cycle views (My Tasks / Leaderboard / Notifications)
//! *   `Space`: Complete selected task
//! *   `a`: Assign a new task (wizard)
//! *   `f`: Cycle leaderboard timeframe
//! *   `r`: Refresh data from the store
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! # Assign a task
//! workpulse assign "Quarterly report" --to "Sarah Johnson" --by "Alex Kim" \
//!     --difficulty medium --priority high --hours 4
//!
//! # List pending tasks for one employee
//! workpulse tasks --user "Sarah Johnson"
//!
//! # Complete a task (awards points to the assignee)
//! workpulse complete <TASK_ID>
//!
//! # Rankings and analytics
//! workpulse leaderboard --timeframe week
//! workpulse analytics --timeframe month
//!
//! # Gamification extras
//! workpulse streak "Sarah Johnson"
//! workpulse notifications "Sarah Johnson"
//! workpulse challenges
//!
//! # Team management
//! workpulse employee add "Sarah Johnson" --department Development \
//!     --email sarah@example.com
//! workpulse employee list
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

use workpulse::commands::*;
use workpulse::models::{Difficulty, Priority, TaskType, Timeframe};
use workpulse::store::RemoteStore;
use workpulse::tui::run_tui;

#[derive(Parser)]
#[command(name = "workpulse")]
#[command(about = "Team task & productivity tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assign a new task to an employee
    Assign {
        /// Task name (quoted if it has spaces)
        name: String,
        /// Employee the task is assigned to
        #[arg(long = "to")]
        assigned_to: String,
        /// Employer assigning the task
        #[arg(long = "by")]
        assigned_by: String,
        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,
        /// Task type (bau, adhoc, project)
        #[arg(short = 't', long, default_value = "bau")]
        task_type: TaskType,
        /// Difficulty (easy, medium, hard); drives the point reward
        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,
        /// Priority (low, medium, high, urgent)
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
        /// Estimated effort in hours
        #[arg(short = 'H', long, default_value_t = 1.0)]
        hours: f64,
    },
    /// List tasks
    Tasks {
        /// Only tasks assigned to this employee
        #[arg(short, long)]
        user: Option<String>,
        /// Include completed tasks
        #[arg(short, long)]
        all: bool,
    },
    /// Mark a task as complete and award points to the assignee
    Complete {
        /// Task id (the store's record key)
        id: String,
    },
    /// Manage employees
    Employee {
        #[command(subcommand)]
        command: EmployeeCommand,
    },
    /// Show the top performers leaderboard
    Leaderboard {
        /// Timeframe window (week, month, quarter, all)
        #[arg(short, long, default_value = "week")]
        timeframe: Timeframe,
    },
    /// Show the team analytics dashboard
    Analytics {
        /// Timeframe window (week, month, quarter, all)
        #[arg(short, long, default_value = "week")]
        timeframe: Timeframe,
    },
    /// Show an employee's daily completion streak
    Streak {
        /// Employee name
        user: String,
    },
    /// Show derived notifications for an employee
    Notifications {
        /// Employee name
        user: String,
    },
    /// Show team challenge progress
    Challenges,
    /// Browse the reports panel (built-in sample data)
    Reports {
        /// Search term matched against report name and team
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by team
        #[arg(long)]
        team: Option<String>,
        /// Filter by timeframe (Weekly, Monthly, Quarterly)
        #[arg(short, long)]
        timeframe: Option<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open the interactive dashboard
    Ui {
        /// Employee name for the session (my-tasks view, completions)
        #[arg(short, long)]
        user: String,
    },
}

#[derive(Subcommand)]
enum EmployeeCommand {
    /// Register a new employee
    Add {
        /// Employee name
        name: String,
        /// Department
        #[arg(short, long)]
        department: String,
        /// Contact email
        #[arg(short, long)]
        email: String,
    },
    /// List registered employees
    List,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Assign {
            name,
            assigned_to,
            assigned_by,
            description,
            task_type,
            difficulty,
            priority,
            hours,
        } => {
            let store = RemoteStore::from_env();
            cmd_assign(
                &store,
                name,
                description,
                assigned_to,
                assigned_by,
                task_type,
                difficulty,
                priority,
                hours,
            )?;
        }
        Command::Tasks { user, all } => {
            cmd_tasks(&RemoteStore::from_env(), user, all)?;
        }
        Command::Complete { id } => {
            cmd_complete(&RemoteStore::from_env(), &id)?;
        }
        Command::Employee { command } => match command {
            EmployeeCommand::Add {
                name,
                department,
                email,
            } => cmd_employee_add(&RemoteStore::from_env(), name, department, email)?,
            EmployeeCommand::List => cmd_employee_list(&RemoteStore::from_env())?,
        },
        Command::Leaderboard { timeframe } => {
            cmd_leaderboard(&RemoteStore::from_env(), timeframe)?;
        }
        Command::Analytics { timeframe } => {
            cmd_analytics(&RemoteStore::from_env(), timeframe)?;
        }
        Command::Streak { user } => {
            cmd_streak(&RemoteStore::from_env(), &user)?;
        }
        Command::Notifications { user } => {
            cmd_notifications(&RemoteStore::from_env(), &user)?;
        }
        Command::Challenges => {
            cmd_challenges(&RemoteStore::from_env())?;
        }
        Command::Reports {
            search,
            team,
            timeframe,
        } => {
            cmd_reports(search, team, timeframe);
        }
        Command::Completions { shell } => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return Ok(());
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "workpulse", &mut io::stdout());
        }
        Command::Ui { user } => {
            run_tui(RemoteStore::from_env(), user)?;
        }
    }
    Ok(())
}
