//! # Connect Four
//!
//! Two-player Connect Four for the terminal. The rules live in a plain
//! [`game::GameSession`] value that reports to any [`game::View`]; the
//! terminal UI built with Ratatui is one such view.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, win detection, turn controller
//! - [`ui`] — Terminal UI and plain line-mode front-end
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — tracing subscriber setup
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
