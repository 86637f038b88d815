use chrono::Utc;
use ratatui::widgets::TableState;

use crate::aggregate::{leaderboard, user_points_total, LeaderboardEntry};
use crate::commands::{assign_task, complete_task};
use crate::models::{Difficulty, PointEntry, Priority, Task, TaskStatus, TaskType, Timeframe};
use crate::notify::{derive_notifications, Notification};
use crate::store::RemoteStore;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Assigning,
}

#[derive(Clone, Copy, PartialEq)]
pub enum ViewMode {
    MyTasks,
    Leaderboard,
    Notifications,
}

/// State for the multi-step "Assign Task" wizard.
#[derive(Default)]
pub struct AssignState {
    pub name: String,
    pub assigned_to: String,
    pub step: usize, // 0: Name, 1: Assignee, 2: Difficulty
}

pub struct App {
    store: RemoteStore,
    pub user: String,
    pub tasks: Vec<Task>,
    pub points: Vec<PointEntry>,
    pub my_tasks: Vec<Task>,
    pub board: Vec<LeaderboardEntry>,
    pub notifications: Vec<Notification>,
    pub total_points: u32,
    pub timeframe: Timeframe,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub assign_state: AssignState,
    pub state: TableState,
    /// Outcome of the last store call, shown in the status line. Failed
    /// calls land here instead of aborting the UI.
    pub status: Option<String>,
}

impl App {
    /// Creates the app and fetches the initial snapshot.
    pub fn new(store: RemoteStore, user: String) -> App {
        let mut app = App {
            store,
            user,
            tasks: Vec::new(),
            points: Vec::new(),
            my_tasks: Vec::new(),
            board: Vec::new(),
            notifications: Vec::new(),
            total_points: 0,
            timeframe: Timeframe::Week,
            view_mode: ViewMode::MyTasks,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            assign_state: AssignState::default(),
            state: TableState::default(),
            status: None,
        };
        app.refresh();
        app
    }

    /// Refetches tasks and points and rebuilds every derived view.
    pub fn refresh(&mut self) {
        match (self.store.list_tasks(), self.store.list_points()) {
            (Ok(tasks), Ok(points)) => {
                self.tasks = tasks;
                self.points = points;
                self.status = None;
            }
            (Err(e), _) | (_, Err(e)) => {
                self.status = Some(format!("Refresh failed: {}", e));
                return;
            }
        }
        self.rebuild_views();
    }

    /// Recomputes the derived views from the cached snapshot.
    fn rebuild_views(&mut self) {
        let now = Utc::now();
        self.my_tasks = self
            .tasks
            .iter()
            .filter(|t| t.assigned_to == self.user && t.status == TaskStatus::Pending)
            .cloned()
            .collect();
        self.board = leaderboard(&self.points, &self.tasks, self.timeframe, now);
        self.notifications = derive_notifications(&self.user, &self.tasks, &self.points, now);
        self.total_points = user_points_total(&self.points, &self.user);

        let len = self.current_len();
        if len == 0 {
            self.state.select(None);
        } else {
            match self.state.selected() {
                Some(i) if i < len => {}
                _ => self.state.select(Some(0)),
            }
        }
    }

    fn current_len(&self) -> usize {
        match self.view_mode {
            ViewMode::MyTasks => self.my_tasks.len(),
            ViewMode::Leaderboard => self.board.len(),
            ViewMode::Notifications => self.notifications.len(),
        }
    }

    /// Selects the next row in the current view.
    pub fn next(&mut self) {
        let len = self.current_len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous row in the current view.
    pub fn previous(&mut self) {
        let len = self.current_len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Completes the selected task in the My Tasks view.
    pub fn complete_selected(&mut self) {
        if self.view_mode != ViewMode::MyTasks {
            return;
        }
        if let Some(i) = self.state.selected() {
            if i < self.my_tasks.len() {
                let id = self.my_tasks[i].id.clone();
                match complete_task(&self.store, &id) {
                    Ok(receipt) => {
                        self.status = Some(format!(
                            "Task '{}' completed! You earned {} points.",
                            receipt.task_name, receipt.points
                        ));
                        self.refetch_keeping_status();
                    }
                    Err(e) => self.status = Some(format!("Complete failed: {}", e)),
                }
            }
        }
    }

    /// Opens the assign wizard.
    pub fn start_assign(&mut self) {
        self.input_mode = InputMode::Assigning;
        self.assign_state = AssignState::default();
        self.input_buffer.clear();
    }

    /// Cycles My Tasks -> Leaderboard -> Notifications.
    pub fn cycle_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::MyTasks => ViewMode::Leaderboard,
            ViewMode::Leaderboard => ViewMode::Notifications,
            ViewMode::Notifications => ViewMode::MyTasks,
        };
        self.state.select(if self.current_len() == 0 { None } else { Some(0) });
    }

    /// Cycles the leaderboard timeframe window.
    pub fn cycle_timeframe(&mut self) {
        self.timeframe = match self.timeframe {
            Timeframe::Week => Timeframe::Month,
            Timeframe::Month => Timeframe::AllTime,
            Timeframe::AllTime => Timeframe::Week,
            Timeframe::Quarter => Timeframe::Week,
        };
        self.rebuild_views();
    }

    /// Advances the assign wizard on Enter.
    pub fn handle_input(&mut self) {
        match self.assign_state.step {
            0 => {
                if !self.input_buffer.is_empty() {
                    self.assign_state.name = self.input_buffer.clone();
                    self.assign_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            1 => {
                if !self.input_buffer.is_empty() {
                    self.assign_state.assigned_to = self.input_buffer.clone();
                    self.assign_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            2 => {
                let difficulty = if self.input_buffer.is_empty() {
                    Difficulty::Easy
                } else {
                    match self.input_buffer.parse::<Difficulty>() {
                        Ok(d) => d,
                        Err(_) => return, // keep editing until it parses
                    }
                };
                let result = assign_task(
                    &self.store,
                    self.assign_state.name.clone(),
                    None,
                    self.assign_state.assigned_to.clone(),
                    self.user.clone(),
                    TaskType::Bau,
                    difficulty,
                    Priority::Medium,
                    1.0,
                );
                match result {
                    Ok(_) => {
                        self.status = Some(format!(
                            "Task '{}' assigned to {}.",
                            self.assign_state.name, self.assign_state.assigned_to
                        ));
                        self.refetch_keeping_status();
                    }
                    Err(e) => self.status = Some(format!("Assign failed: {}", e)),
                }
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            _ => {}
        }
    }

    /// Refresh that preserves the status line set by the caller.
    fn refetch_keeping_status(&mut self) {
        let status = self.status.take();
        self.refresh();
        if self.status.is_none() {
            self.status = status;
        }
    }
}
