use std::path::PathBuf;

use anyhow::Result;
use log::info;

use super::radar::StatusRadar;
use super::state::{App, Composer, FocusArea};
use crate::api::ApiClient;
use crate::brand::Brand;
use crate::config::UiConfig;
use crate::panels::{chat::ChatPanel, sessions::SessionList};

impl App {
    /// Creates a new instance of the `App` state.
    ///
    /// Loads the persisted configuration from `root`, then triggers the
    /// initial backend initialization and the first radar poll cycle.
    /// Must run inside a tokio runtime.
    pub fn new(root: PathBuf) -> Result<Self> {
        let brand = Brand::from_env();
        let config = UiConfig::load(&root)?;
        info!(
            "starting {} against {} (mode: {})",
            brand.name,
            config.endpoint,
            config.mode.label()
        );

        let mut app = Self {
            running: true,
            brand,
            root,
            config,
            api: ApiClient::new(),
            endpoint_active: false,
            endpoint_loading: false,
            refresh_started: None,
            endpoint_editor: None,
            token_editor: None,
            selected_agent_id: None,
            selected_team_id: None,
            selected_session_id: None,
            selected_model: None,
            agents: Vec::new(),
            teams: Vec::new(),
            sessions: SessionList::default(),
            chat: ChatPanel::default(),
            focus: FocusArea::Composer,
            sidebar_collapsed: false,
            composer: Composer::new(),
            radar: StatusRadar::new(),
            last_radar_poll: None,
            notice: None,
        };

        app.initialize_backend();
        app.poll_radar_now();
        Ok(app)
    }
}
