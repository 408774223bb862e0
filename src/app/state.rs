//! Defines the core state structures for the application.
//!
//! This module contains the central `App` struct that holds the entire state
//! of the TUI client: the committed endpoint and its activity flag, the
//! mode/entity selection, the dependent collections (agents, teams, sessions,
//! messages) and the transient UI state around them. The `App` is the single
//! source of truth; it is only ever mutated from the event-processing loop.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::api::models::{AgentSummary, TeamSummary};
use crate::api::ApiClient;
use crate::app::radar::StatusRadar;
use crate::brand::Brand;
use crate::config::UiConfig;
use crate::panels::{chat::ChatPanel, sessions::SessionList};

/// How long a notification stays visible in the status bar.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Minimum visible duration of the refresh spinner, even when the
/// underlying call resolves sooner.
pub const REFRESH_MIN_SPIN: Duration = Duration::from_millis(500);

/// The high-level operating selection: chat with a single agent or with a
/// team. Gates which entity selector is shown and which API routes are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Agent,
    Team,
}

impl Mode {
    /// Path segment used by the backend API for this mode.
    pub fn api_segment(self) -> &'static str {
        match self {
            Mode::Agent => "agents",
            Mode::Team => "teams",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Agent => "Agent",
            Mode::Team => "Team",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Agent => Mode::Team,
            Mode::Team => Mode::Agent,
        }
    }
}

/// The currently focused UI area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusArea {
    /// The chat input composer.
    Composer,
    /// The session list in the sidebar.
    Sessions,
    /// The conversation history.
    Chat,
}

impl FocusArea {
    pub fn next(self) -> Self {
        match self {
            FocusArea::Composer => FocusArea::Sessions,
            FocusArea::Sessions => FocusArea::Chat,
            FocusArea::Chat => FocusArea::Composer,
        }
    }
}

/// Severity of a transient status-bar notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient, non-blocking notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub text: String,
    pub level: NoticeLevel,
    pub shown_at: Instant,
}

/// The main application state.
pub struct App {
    // --- Core ---
    /// Flag to indicate if the application should keep running.
    pub running: bool,
    /// Brand strings resolved once at startup.
    pub brand: Brand,
    /// Root directory for the persisted config.
    pub(crate) root: PathBuf,
    /// Persisted configuration; `config.endpoint` is the committed endpoint.
    pub config: UiConfig,
    /// Backend API client; completions are drained on tick.
    pub(crate) api: ApiClient,

    // --- Endpoint state ---
    /// True when the committed endpoint answered the last initialization.
    pub endpoint_active: bool,
    /// True while an initialization round-trip is in flight.
    pub endpoint_loading: bool,
    /// When the user last triggered a manual refresh, for the spinner.
    pub(crate) refresh_started: Option<Instant>,
    /// Draft editor for the endpoint; `Some` while edit mode is open.
    pub endpoint_editor: Option<Composer>,
    /// Draft editor for the bearer token; `Some` while edit mode is open.
    pub token_editor: Option<Composer>,

    // --- Selection ---
    pub selected_agent_id: Option<String>,
    pub selected_team_id: Option<String>,
    pub selected_session_id: Option<String>,
    /// Model name of the selected entity, when known.
    pub selected_model: Option<String>,

    // --- Dependent collections ---
    pub agents: Vec<AgentSummary>,
    pub teams: Vec<TeamSummary>,
    pub sessions: SessionList,
    pub chat: ChatPanel,

    // --- Panels & transient UI ---
    pub focus: FocusArea,
    pub sidebar_collapsed: bool,
    pub composer: Composer,
    pub radar: StatusRadar,
    pub(crate) last_radar_poll: Option<Instant>,
    pub notice: Option<Notification>,
}

impl App {
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// Id of the selected entity under the current mode.
    pub fn selected_entity_id(&self) -> Option<&str> {
        match self.config.mode {
            Mode::Agent => self.selected_agent_id.as_deref(),
            Mode::Team => self.selected_team_id.as_deref(),
        }
    }

    /// The model display is conditioned on a non-empty entity selection,
    /// not merely on mode.
    pub fn model_display(&self) -> Option<&str> {
        if self.selected_agent_id.is_some() || self.selected_team_id.is_some() {
            self.selected_model.as_deref()
        } else {
            None
        }
    }

    /// "New Chat" is available only once the conversation holds messages.
    pub fn can_start_new_chat(&self) -> bool {
        self.chat.message_count() > 0
    }

    /// True while the manual-refresh spinner should be drawn. The spinner
    /// holds for at least [`REFRESH_MIN_SPIN`] past the trigger.
    pub fn is_refreshing(&self) -> bool {
        match self.refresh_started {
            Some(started) => self.endpoint_loading || started.elapsed() < REFRESH_MIN_SPIN,
            None => false,
        }
    }

    pub fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notification {
            text: text.into(),
            level,
            shown_at: Instant::now(),
        });
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

/// Single-line text input with cursor movement and history.
///
/// Used for the chat composer and, seeded without history, for the endpoint
/// draft.
#[derive(Clone, Default)]
pub struct Composer {
    buffer: String,
    cursor: usize,
    history: Vec<String>,
    history_index: Option<usize>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A composer seeded with an initial value, cursor at the end.
    pub fn seeded(initial: impl Into<String>) -> Self {
        let buffer = initial.into();
        let cursor = buffer.len();
        Self {
            buffer,
            cursor,
            history: Vec::new(),
            history_index: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Inserts a character at the current cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.reset_history_navigation();
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.buffer.drain(idx..self.cursor);
            self.cursor = idx;
            self.reset_history_navigation();
        }
    }

    /// Deletes the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor >= self.buffer.len() {
            return;
        }
        if let Some((_, ch)) = self.buffer[self.cursor..].char_indices().next() {
            let end = self.cursor + ch.len_utf8();
            self.buffer.drain(self.cursor..end);
            self.reset_history_navigation();
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        } else {
            self.cursor = 0;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor >= self.buffer.len() {
            return;
        }
        if let Some((offset, ch)) = self.buffer[self.cursor..].char_indices().next() {
            self.cursor += offset + ch.len_utf8();
        } else {
            self.cursor = self.buffer.len();
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.reset_history_navigation();
    }

    /// Takes the content of the buffer, adds it to history, and clears it.
    pub fn take(&mut self) -> String {
        let content = std::mem::take(&mut self.buffer);
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.cursor = 0;
        self.reset_history_navigation();
        content
    }

    pub fn history_previous(&mut self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        let target = match self.history_index {
            Some(0) => 0,
            Some(idx) => idx.saturating_sub(1),
            None => self.history.len().saturating_sub(1),
        };
        self.load_history(target)
    }

    pub fn history_next(&mut self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        match self.history_index {
            Some(idx) if idx + 1 < self.history.len() => self.load_history(idx + 1),
            _ => {
                self.history_index = None;
                self.buffer.clear();
                self.cursor = 0;
                true
            }
        }
    }

    fn load_history(&mut self, index: usize) -> bool {
        if let Some(entry) = self.history.get(index).cloned() {
            self.buffer = entry;
            self.cursor = self.buffer.len();
            self.history_index = Some(index);
            true
        } else {
            false
        }
    }

    fn reset_history_navigation(&mut self) {
        self.history_index = None;
    }

    /// Display column of the cursor, accounting for wide characters.
    pub fn cursor_column(&self) -> u16 {
        let width: usize = self.buffer[..self.cursor]
            .chars()
            .map(|ch| {
                unicode_width::UnicodeWidthChar::width(ch)
                    .unwrap_or(1)
                    .max(1)
            })
            .sum();
        width.min(u16::MAX as usize) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composer_take_records_history() {
        let mut composer = Composer::new();
        for ch in "hello".chars() {
            composer.insert_char(ch);
        }
        assert_eq!(composer.take(), "hello");
        assert!(composer.is_empty());
        assert!(composer.history_previous());
        assert_eq!(composer.text(), "hello");
    }

    #[test]
    fn composer_handles_multibyte_edits() {
        let mut composer = Composer::new();
        composer.insert_char('宇');
        composer.insert_char('宙');
        composer.move_left();
        composer.backspace();
        assert_eq!(composer.text(), "宙");
        assert_eq!(composer.cursor_column(), 0);
    }

    #[test]
    fn mode_toggles_between_agent_and_team() {
        assert_eq!(Mode::Agent.toggled(), Mode::Team);
        assert_eq!(Mode::Team.toggled(), Mode::Agent);
        assert_eq!(Mode::Agent.api_segment(), "agents");
        assert_eq!(Mode::Team.api_segment(), "teams");
    }
}
