//! spherag - browse Spherag farms and their field devices from the terminal.
//!
//! The same building blocks back both front ends: the `spherag` CLI
//! subcommands print tables, and the bare `spherag` command opens the TUI.
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod cli_output;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod widgets;
