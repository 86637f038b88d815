use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, InputMode, ViewMode};
use crate::models::Priority;
use crate::notify::NotificationKind;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Table
                Constraint::Length(3), // Help / status
            ]
            .as_ref(),
        )
        .split(f.area());

    let header = Paragraph::new(format!(
        "{}  |  Total Points: {}  |  Timeframe: {}",
        app.user,
        app.total_points,
        app.timeframe.label()
    ))
    .style(Style::default().fg(Color::Cyan))
    .block(Block::default().borders(Borders::ALL).title("Workpulse"));
    f.render_widget(header, chunks[0]);

    match app.view_mode {
        ViewMode::MyTasks => {
            let rows: Vec<Row> = app
                .my_tasks
                .iter()
                .map(|t| {
                    let style = match t.priority {
                        Priority::Urgent => Style::default().fg(Color::Red),
                        Priority::High => Style::default().fg(Color::Yellow),
                        _ => Style::default().fg(Color::Green),
                    };
                    Row::new(vec![
                        Cell::from(t.task_name.clone()),
                        Cell::from(t.difficulty.label()),
                        Cell::from(t.priority.label()),
                        Cell::from(format!("{} pts", t.difficulty.points())),
                        Cell::from(t.assigned_by.clone()),
                        Cell::from(t.timestamp.format("%Y-%m-%d").to_string()),
                    ])
                    .style(style)
                })
                .collect();

            let widths = [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(15),
                Constraint::Length(12),
            ];

            let table = Table::new(rows, widths)
                .header(
                    Row::new(vec!["Task", "Difficulty", "Priority", "Reward", "By", "Assigned"])
                        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                        .bottom_margin(1),
                )
                .block(Block::default().borders(Borders::ALL).title("My Tasks"))
                .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
                .highlight_symbol(">> ");

            f.render_stateful_widget(table, chunks[1], &mut app.state);
        }
        ViewMode::Leaderboard => {
            let rows: Vec<Row> = app
                .board
                .iter()
                .enumerate()
                .map(|(rank, e)| {
                    let style = match rank {
                        0 => Style::default().fg(Color::Yellow),
                        1 => Style::default().fg(Color::Gray),
                        2 => Style::default().fg(Color::LightRed),
                        _ => Style::default(),
                    };
                    Row::new(vec![
                        Cell::from(format!("{}", rank + 1)),
                        Cell::from(e.user_name.clone()),
                        Cell::from(e.points.to_string()),
                        Cell::from(e.completed_tasks.to_string()),
                    ])
                    .style(style)
                })
                .collect();

            let widths = [
                Constraint::Length(5),
                Constraint::Min(20),
                Constraint::Length(8),
                Constraint::Length(16),
            ];

            let title = format!("Top Performers - {}", app.timeframe.label());
            let table = Table::new(rows, widths)
                .header(
                    Row::new(vec!["Rank", "Employee", "Points", "Tasks Completed"])
                        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                        .bottom_margin(1),
                )
                .block(Block::default().borders(Borders::ALL).title(title))
                .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
                .highlight_symbol(">> ");

            f.render_stateful_widget(table, chunks[1], &mut app.state);
        }
        ViewMode::Notifications => {
            let rows: Vec<Row> = app
                .notifications
                .iter()
                .map(|n| {
                    let style = match n.kind {
                        NotificationKind::Achievement => Style::default().fg(Color::Green),
                        NotificationKind::Reminder => Style::default().fg(Color::Blue),
                        NotificationKind::Alert => Style::default().fg(Color::Red),
                    };
                    Row::new(vec![
                        Cell::from(n.kind.label()),
                        Cell::from(n.title.clone()),
                        Cell::from(n.message.clone()),
                    ])
                    .style(style)
                })
                .collect();

            let widths = [
                Constraint::Length(12),
                Constraint::Length(22),
                Constraint::Min(30),
            ];

            let table = Table::new(rows, widths)
                .header(
                    Row::new(vec!["Type", "Title", "Message"])
                        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                        .bottom_margin(1),
                )
                .block(Block::default().borders(Borders::ALL).title("Notifications"))
                .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
                .highlight_symbol(">> ");

            f.render_stateful_widget(table, chunks[1], &mut app.state);
        }
    }

    let help_text = match app.input_mode {
        InputMode::Normal => match &app.status {
            Some(status) => status.clone(),
            None => match app.view_mode {
                ViewMode::MyTasks => {
                    "q: Quit | Space: Complete | a: Assign | v: Next View | f: Timeframe | r: Refresh"
                        .to_string()
                }
                ViewMode::Leaderboard => {
                    "q: Quit | f: Timeframe | a: Assign | v: Next View | r: Refresh".to_string()
                }
                ViewMode::Notifications => {
                    "q: Quit | a: Assign | v: Next View | r: Refresh".to_string()
                }
            },
        },
        InputMode::Assigning => "Enter: Next Step | Esc: Cancel".to_string(),
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[2]);

    // Render the assign wizard input box if needed
    if app.input_mode == InputMode::Assigning {
        let area = centered_rect(60, 3, f.area());
        f.render_widget(Clear, area);

        let title = match app.assign_state.step {
            0 => "Assign Task: Enter Name",
            1 => "Assign Task: Enter Assignee",
            2 => "Assign Task: Enter Difficulty (easy/medium/hard)",
            _ => "Assign Task",
        };

        let input = Paragraph::new(app.input_buffer.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(input, area);
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length((r.height.saturating_sub(height)) / 2),
                Constraint::Length(height),
                Constraint::Length((r.height.saturating_sub(height)) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
