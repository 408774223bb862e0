//! Endpoint edit/commit/cancel flow.
//!
//! The committed endpoint is the single source of truth for which backend the
//! rest of the UI talks to. Committing a new value is the only way to change
//! it, and a commit unconditionally resets every piece of dependent state —
//! even when the normalized draft equals the previous value.

use log::{info, warn};
use url::Url;

use super::state::{App, Composer, NoticeLevel};

impl App {
    /// Enters endpoint edit mode, seeding the draft with the committed value.
    pub(crate) fn begin_endpoint_edit(&mut self) {
        self.endpoint_editor = Some(Composer::seeded(self.config.endpoint.clone()));
    }

    /// Discards the draft and exits edit mode. No side effects on dependent
    /// state.
    pub(crate) fn cancel_endpoint_edit(&mut self) {
        self.endpoint_editor = None;
    }

    /// Validates and commits the draft endpoint.
    ///
    /// Rejected drafts leave every piece of state untouched and keep edit
    /// mode open for correction. Accepted drafts are normalized (surrounding
    /// whitespace trimmed, exactly one trailing slash stripped), persisted,
    /// and followed by a full reset of the agent/team/session/message
    /// collections and the entity/session selectors before re-initialization.
    pub(crate) fn commit_endpoint(&mut self) {
        let draft = match self.endpoint_editor.as_ref() {
            Some(editor) => editor.text().to_string(),
            None => return,
        };
        let endpoint = match normalize_endpoint(&draft) {
            Some(endpoint) => endpoint,
            None => {
                warn!("rejected endpoint draft: {:?}", draft);
                self.notify(NoticeLevel::Error, "Please enter a valid URL");
                return;
            }
        };

        info!("committing endpoint {}", endpoint);
        self.config.endpoint = endpoint;
        if let Err(err) = self.config.save(&self.root) {
            warn!("failed to persist config: {:#}", err);
        }

        self.endpoint_editor = None;
        self.selected_agent_id = None;
        self.selected_team_id = None;
        self.selected_session_id = None;
        self.selected_model = None;
        self.agents.clear();
        self.teams.clear();
        self.sessions.clear();
        self.chat.clear();
        self.endpoint_active = false;

        self.initialize_backend();
    }

    /// Re-runs initialization against the committed endpoint without
    /// changing it. The spinner flag stays visible for a minimum duration,
    /// handled by [`App::is_refreshing`].
    pub(crate) fn refresh_endpoint(&mut self) {
        self.refresh_started = Some(std::time::Instant::now());
        self.initialize_backend();
    }

    /// Enters token edit mode, seeding the draft with the stored token.
    pub(crate) fn begin_token_edit(&mut self) {
        let current = self.config.auth_token.clone().unwrap_or_default();
        self.token_editor = Some(Composer::seeded(current));
    }

    /// Discards the token draft and exits edit mode.
    pub(crate) fn cancel_token_edit(&mut self) {
        self.token_editor = None;
    }

    /// Commits the token draft. An empty draft clears the stored token.
    ///
    /// The token rides on every API and radar call, so initialization
    /// re-runs against the committed endpoint afterwards. Unlike an
    /// endpoint commit, the selection and collections stay as they are.
    pub(crate) fn commit_token(&mut self) {
        let draft = match self.token_editor.as_ref() {
            Some(editor) => editor.text().trim().to_string(),
            None => return,
        };
        if draft.is_empty() {
            info!("clearing auth token");
            self.config.auth_token = None;
        } else {
            info!("updating auth token");
            self.config.auth_token = Some(draft);
        }
        if let Err(err) = self.config.save(&self.root) {
            warn!("failed to persist config: {:#}", err);
        }
        self.token_editor = None;
        self.notify(NoticeLevel::Success, "Token updated");
        self.initialize_backend();
    }
}

/// Normalizes a candidate endpoint, or `None` when it is not a well-formed
/// absolute URL. Normalization trims surrounding whitespace and strips
/// exactly one trailing slash.
pub fn normalize_endpoint(draft: &str) -> Option<String> {
    let trimmed = draft.trim();
    Url::parse(trimmed).ok()?;
    Some(trimmed.strip_suffix('/').unwrap_or(trimmed).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{AgentSummary, SessionSummary};
    use crate::app::state::Composer;
    use crate::app::App;
    use tempfile::TempDir;

    fn seeded_app(dir: &TempDir) -> App {
        let mut app = App::new(dir.path().to_path_buf()).expect("app");
        app.agents.push(AgentSummary {
            id: String::from("agent-1"),
            name: String::from("Agent One"),
            model: Some(String::from("gpt-4o")),
            description: None,
        });
        app.sessions.replace(vec![SessionSummary {
            session_id: String::from("sess-1"),
            title: None,
            created_at: None,
        }]);
        app.chat.push_user_prompt("hello");
        app.selected_agent_id = Some(String::from("agent-1"));
        app.selected_session_id = Some(String::from("sess-1"));
        app
    }

    #[test]
    fn normalize_accepts_only_absolute_urls() {
        assert_eq!(
            normalize_endpoint("http://localhost:9999/"),
            Some(String::from("http://localhost:9999"))
        );
        assert_eq!(
            normalize_endpoint("  https://os.example.com  "),
            Some(String::from("https://os.example.com"))
        );
        assert_eq!(normalize_endpoint("not a url"), None);
        assert_eq!(normalize_endpoint(""), None);
        assert_eq!(normalize_endpoint("/relative/path"), None);
    }

    #[test]
    fn normalize_strips_exactly_one_trailing_slash() {
        assert_eq!(
            normalize_endpoint("http://host:1//"),
            Some(String::from("http://host:1/"))
        );
    }

    #[tokio::test]
    async fn commit_replaces_endpoint_and_resets_dependent_state() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = seeded_app(&dir);
        assert_eq!(app.config.endpoint, "http://localhost:7777");

        app.begin_endpoint_edit();
        app.endpoint_editor = Some(Composer::seeded("http://localhost:9999/"));
        app.commit_endpoint();

        assert_eq!(app.config.endpoint, "http://localhost:9999");
        assert!(app.endpoint_editor.is_none());
        assert!(app.agents.is_empty());
        assert!(app.sessions.is_empty());
        assert!(app.chat.entries().is_empty());
        assert!(app.selected_agent_id.is_none());
        assert!(app.selected_session_id.is_none());
    }

    #[tokio::test]
    async fn commit_of_unchanged_value_still_resets() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = seeded_app(&dir);

        app.begin_endpoint_edit();
        app.commit_endpoint();

        assert_eq!(app.config.endpoint, "http://localhost:7777");
        assert!(app.agents.is_empty());
        assert!(app.sessions.is_empty());
        assert!(app.chat.entries().is_empty());
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_without_state_change() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = seeded_app(&dir);

        app.begin_endpoint_edit();
        app.endpoint_editor = Some(Composer::seeded("not a url"));
        app.commit_endpoint();

        assert_eq!(app.config.endpoint, "http://localhost:7777");
        assert!(app.endpoint_editor.is_some(), "edit mode stays open");
        assert_eq!(app.agents.len(), 1);
        assert!(!app.sessions.is_empty());
        assert_eq!(app.chat.entries().len(), 1);
        let notice = app.notice.as_ref().expect("error notice");
        assert_eq!(notice.level, crate::app::state::NoticeLevel::Error);
    }

    #[tokio::test]
    async fn refresh_spinner_holds_for_minimum_duration() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = App::new(dir.path().to_path_buf()).expect("app");
        assert!(!app.is_refreshing());

        app.refresh_endpoint();
        assert!(app.is_refreshing());

        // The call resolving early must not drop the spinner before the
        // minimum duration has passed.
        app.endpoint_loading = false;
        assert!(app.is_refreshing());

        app.refresh_started =
            Some(std::time::Instant::now() - crate::app::REFRESH_MIN_SPIN);
        assert!(!app.is_refreshing());
    }

    #[tokio::test]
    async fn token_commit_persists_and_empty_draft_clears() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = App::new(dir.path().to_path_buf()).expect("app");
        assert!(app.config.auth_token.is_none());

        app.begin_token_edit();
        app.token_editor = Some(Composer::seeded("  secret-token  "));
        app.commit_token();
        assert_eq!(app.config.auth_token.as_deref(), Some("secret-token"));
        assert!(app.token_editor.is_none());

        app.begin_token_edit();
        app.token_editor = Some(Composer::seeded(""));
        app.commit_token();
        assert!(app.config.auth_token.is_none());
    }

    #[tokio::test]
    async fn token_cancel_keeps_stored_value() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = App::new(dir.path().to_path_buf()).expect("app");
        app.config.auth_token = Some(String::from("keep-me"));

        app.begin_token_edit();
        app.token_editor = Some(Composer::seeded("discarded"));
        app.cancel_token_edit();
        assert_eq!(app.config.auth_token.as_deref(), Some("keep-me"));
        assert!(app.token_editor.is_none());
    }

    #[tokio::test]
    async fn cancel_discards_draft_without_side_effects() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = seeded_app(&dir);

        app.begin_endpoint_edit();
        app.endpoint_editor = Some(Composer::seeded("http://localhost:4242"));
        app.cancel_endpoint_edit();

        assert_eq!(app.config.endpoint, "http://localhost:7777");
        assert!(app.endpoint_editor.is_none());
        assert_eq!(app.agents.len(), 1);
        assert!(!app.sessions.is_empty());
    }
}
