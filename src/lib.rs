//! Gnosis TUI: a terminal chat interface for an AgentOS backend.
//!
//! The client keeps all state on a single event-processing loop; network
//! work runs on spawned tasks and reports back through channels drained on
//! tick.

pub mod api;
pub mod app;
pub mod brand;
pub mod config;
pub mod event;
pub mod logging;
pub mod panels;
pub mod tui;
pub mod ui;
