//! Chat, session and initialization actions.
//!
//! Everything here runs on the event-processing thread. Network work is
//! handed to [`crate::api::ApiClient`], which reports back through events
//! applied in [`App::apply_backend_event`].

use std::time::Instant;

use arboard::Clipboard;
use log::{debug, info, warn};

use crate::api::{BackendEvent, FailureContext};

use super::state::{App, FocusArea, Mode, NoticeLevel};

/// Fixed text copied by the ports-registry panel.
pub const PORTS_REGISTRY: &str = "UI: 3200-3203\nAPI: 8600-8603\nDocs: /agno/PORTS.md";

impl App {
    /// Kicks off a full initialization round-trip against the committed
    /// endpoint. Runs on startup and after every endpoint or mode change.
    pub(crate) fn initialize_backend(&mut self) {
        debug!("initializing against {}", self.config.endpoint);
        self.endpoint_loading = true;
        self.api
            .initialize(self.config.endpoint.clone(), self.config.auth_token.clone());
    }

    /// Starts one radar poll cycle and stamps the schedule.
    pub(crate) fn poll_radar_now(&mut self) {
        self.last_radar_poll = Some(Instant::now());
        self.api
            .poll_radar(self.radar.targets(), self.config.auth_token.clone());
    }

    /// Clears the conversation and returns focus to the composer. Ignored
    /// while the conversation is empty.
    pub(crate) fn new_chat(&mut self) {
        if !self.can_start_new_chat() {
            return;
        }
        info!("starting new chat");
        self.chat.clear();
        self.selected_session_id = None;
        self.focus = FocusArea::Composer;
    }

    /// Switches between agent and team mode, persists the choice and
    /// re-initializes. The conversation belongs to the previous entity and
    /// is dropped.
    pub(crate) fn cycle_mode(&mut self) {
        let mode = self.mode().toggled();
        info!("switching mode to {}", mode.label());
        self.config.mode = mode;
        if let Err(err) = self.config.save(&self.root) {
            warn!("failed to persist config: {:#}", err);
        }
        self.selected_session_id = None;
        self.sessions.clear();
        self.chat.clear();
        self.initialize_backend();
    }

    /// Advances the entity selector to the next agent or team of the
    /// current mode.
    pub(crate) fn select_next_entity(&mut self) {
        match self.mode() {
            Mode::Agent => {
                if self.agents.is_empty() {
                    return;
                }
                let next = self
                    .selected_agent_id
                    .as_deref()
                    .and_then(|id| self.agents.iter().position(|agent| agent.id == id))
                    .map(|idx| (idx + 1) % self.agents.len())
                    .unwrap_or(0);
                self.selected_agent_id = Some(self.agents[next].id.clone());
            }
            Mode::Team => {
                if self.teams.is_empty() {
                    return;
                }
                let next = self
                    .selected_team_id
                    .as_deref()
                    .and_then(|id| self.teams.iter().position(|team| team.id == id))
                    .map(|idx| (idx + 1) % self.teams.len())
                    .unwrap_or(0);
                self.selected_team_id = Some(self.teams[next].id.clone());
            }
        }
        self.selected_session_id = None;
        self.chat.clear();
        self.sync_entity_selection();
    }

    /// Sends the composer content to the selected entity.
    pub(crate) fn submit_prompt(&mut self) {
        if self.composer.is_empty() || self.chat.awaiting_reply() {
            return;
        }
        if !self.endpoint_active {
            self.notify(NoticeLevel::Error, "Endpoint is not active");
            return;
        }
        let entity_id = match self.selected_entity_id() {
            Some(id) => id.to_string(),
            None => {
                self.notify(NoticeLevel::Error, "Select an agent or team first");
                return;
            }
        };
        let message = self.composer.take();
        self.chat.push_user_prompt(message.clone());
        self.chat.set_awaiting_reply(true);
        self.api.run(
            self.config.endpoint.clone(),
            self.config.auth_token.clone(),
            self.mode(),
            entity_id,
            self.selected_session_id.clone(),
            message,
        );
    }

    /// Loads the transcript of the session under the cursor.
    pub(crate) fn load_selected_session(&mut self) {
        let session_id = match self.sessions.selected_session() {
            Some(session) => session.session_id.clone(),
            None => return,
        };
        let entity_id = match self.selected_entity_id() {
            Some(id) => id.to_string(),
            None => return,
        };
        self.api.load_session(
            self.config.endpoint.clone(),
            self.config.auth_token.clone(),
            self.mode(),
            entity_id,
            session_id,
        );
    }

    /// Deletes the session under the cursor on the backend.
    pub(crate) fn delete_selected_session(&mut self) {
        let session_id = match self.sessions.selected_session() {
            Some(session) => session.session_id.clone(),
            None => return,
        };
        let entity_id = match self.selected_entity_id() {
            Some(id) => id.to_string(),
            None => return,
        };
        info!("deleting session {}", session_id);
        self.api.delete_session(
            self.config.endpoint.clone(),
            self.config.auth_token.clone(),
            self.mode(),
            entity_id,
            session_id,
        );
    }

    /// Copies the ports registry to the system clipboard.
    pub(crate) fn copy_ports(&mut self) {
        let result =
            Clipboard::new().and_then(|mut clipboard| clipboard.set_text(PORTS_REGISTRY));
        match result {
            Ok(()) => self.notify(NoticeLevel::Success, "Ports copied to clipboard"),
            Err(err) => {
                warn!("clipboard write failed: {}", err);
                self.notify(NoticeLevel::Error, "Failed to copy ports");
            }
        }
    }

    /// Applies one completed backend event to the shared state.
    pub(crate) fn apply_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Initialized {
                agents,
                teams,
                active,
            } => {
                self.endpoint_loading = false;
                self.endpoint_active = active;
                self.agents = agents;
                self.teams = teams;
                if active {
                    debug!(
                        "initialized: {} agents, {} teams",
                        self.agents.len(),
                        self.teams.len()
                    );
                    self.sync_entity_selection();
                } else {
                    self.sessions.clear();
                    self.notify(NoticeLevel::Error, "Endpoint is unreachable");
                }
            }
            BackendEvent::Sessions(sessions) => {
                self.sessions.replace(sessions);
            }
            BackendEvent::SessionLoaded(detail) => {
                self.selected_session_id = Some(detail.session_id.clone());
                self.chat.load_transcript(&detail.messages);
                self.focus = FocusArea::Composer;
            }
            BackendEvent::SessionDeleted(session_id) => {
                self.sessions.remove(&session_id);
                if self.selected_session_id.as_deref() == Some(session_id.as_str()) {
                    self.selected_session_id = None;
                    self.chat.clear();
                }
                self.notify(NoticeLevel::Success, "Session deleted");
            }
            BackendEvent::RunCompleted(response) => {
                self.chat.set_awaiting_reply(false);
                if let Some(session_id) = response.session_id {
                    self.selected_session_id = Some(session_id);
                }
                if response.model.is_some() {
                    self.selected_model = response.model;
                }
                self.chat.push_reply(response.content);
            }
            BackendEvent::RadarCycle(cycle) => {
                self.radar.apply_cycle(cycle);
            }
            BackendEvent::Failed { context, detail } => {
                warn!("{} failed: {}", context.label(), detail);
                if context == FailureContext::Run {
                    self.chat.set_awaiting_reply(false);
                    self.chat.push_error(context.label(), detail.clone());
                }
                self.notify(
                    NoticeLevel::Error,
                    format!("{}: {}", context.label(), detail),
                );
            }
        }
    }

    /// Keeps the entity selection valid against the freshly fetched
    /// collections, derives the model display and refreshes the session
    /// list for the selection.
    fn sync_entity_selection(&mut self) {
        match self.mode() {
            Mode::Agent => {
                let valid = self
                    .selected_agent_id
                    .as_deref()
                    .map(|id| self.agents.iter().any(|agent| agent.id == id))
                    .unwrap_or(false);
                if !valid {
                    self.selected_agent_id = self.agents.first().map(|agent| agent.id.clone());
                }
                self.selected_model = self
                    .selected_agent_id
                    .as_deref()
                    .and_then(|id| self.agents.iter().find(|agent| agent.id == id))
                    .and_then(|agent| agent.model.clone());
            }
            Mode::Team => {
                let valid = self
                    .selected_team_id
                    .as_deref()
                    .map(|id| self.teams.iter().any(|team| team.id == id))
                    .unwrap_or(false);
                if !valid {
                    self.selected_team_id = self.teams.first().map(|team| team.id.clone());
                }
                self.selected_model = self
                    .selected_team_id
                    .as_deref()
                    .and_then(|id| self.teams.iter().find(|team| team.id == id))
                    .and_then(|team| team.model.clone());
            }
        }
        match self.selected_entity_id() {
            Some(entity_id) => {
                let entity_id = entity_id.to_string();
                self.api.fetch_sessions(
                    self.config.endpoint.clone(),
                    self.config.auth_token.clone(),
                    self.mode(),
                    entity_id,
                );
            }
            None => self.sessions.clear(),
        }
    }
}
