//! The `app` module is the core of the client.
//!
//! It owns the application state, handles keyboard input, and coordinates
//! the backend client, the status radar and the UI panels. This `mod.rs`
//! declares the submodules and re-exports the key types.

/// Chat, session and initialization actions.
mod chat;
/// Endpoint edit/commit/cancel flow.
mod endpoint;
/// Construction of the `App` state.
mod init;
/// Keyboard input handling.
mod keyboard;
/// Agent status radar state and health mapping.
pub mod radar;
/// The `App` struct and core state types.
mod state;
/// Timed updates: event draining, radar schedule, expirations.
mod tick;

pub use chat::PORTS_REGISTRY;
pub use endpoint::normalize_endpoint;
pub use state::{
    App, Composer, FocusArea, Mode, NoticeLevel, Notification, NOTICE_TTL, REFRESH_MIN_SPIN,
};
