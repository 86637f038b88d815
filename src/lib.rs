//! Core library for the workpulse tracker: data model, remote store client,
//! aggregation engine, notification rules and the reports sample panel.
//!
//! The binary in `main.rs` wires these into a CLI and an interactive TUI.

pub mod aggregate;
pub mod commands;
pub mod models;
pub mod notify;
pub mod reports;
pub mod store;
pub mod tui;
