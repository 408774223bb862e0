//! Async client for the AgentOS HTTP API.
//!
//! Every operation spawns a tokio task and reports its outcome through an
//! unbounded MPSC channel. The UI thread drains the channel on each tick via
//! [`ApiClient::poll_event`], so no network call ever blocks rendering and no
//! failure ever propagates as a fault: bad outcomes become events the app
//! turns into notifications or sentinel state.

use futures_util::future::join_all;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::radar::RadarTarget;
use crate::app::Mode;

pub mod models;

use models::{
    AgentSummary, RunPayload, RunResponse, SessionDetail, SessionSummary, TeamSummary,
};

/// Typed errors for single API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {detail}")]
    Status { status: u16, detail: String },
}

/// Which backend operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureContext {
    Sessions,
    SessionLoad,
    SessionDelete,
    Run,
}

impl FailureContext {
    /// Human-readable name used in notifications and logs.
    pub fn label(self) -> &'static str {
        match self {
            FailureContext::Sessions => "Load sessions",
            FailureContext::SessionLoad => "Load session",
            FailureContext::SessionDelete => "Delete session",
            FailureContext::Run => "Agent run",
        }
    }
}

/// Completions delivered back to the UI thread.
#[derive(Debug)]
pub enum BackendEvent {
    /// Initialization finished. `active` is false when the agent listing
    /// failed; the collections are whatever could be fetched.
    Initialized {
        agents: Vec<AgentSummary>,
        teams: Vec<TeamSummary>,
        active: bool,
    },
    /// Session list for the currently selected entity.
    Sessions(Vec<SessionSummary>),
    /// A full transcript was loaded.
    SessionLoaded(SessionDetail),
    /// A session was deleted on the backend.
    SessionDeleted(String),
    /// The assistant replied to a run.
    RunCompleted(RunResponse),
    /// One radar poll cycle finished; transport failures arrive as code 0.
    RadarCycle(Vec<(&'static str, u16)>),
    /// A non-initialization call failed; surfaced as a notification.
    Failed {
        context: FailureContext,
        detail: String,
    },
}

/// Handle used by the app to issue backend calls.
pub struct ApiClient {
    client: Client,
    events_tx: UnboundedSender<BackendEvent>,
    events_rx: UnboundedReceiver<BackendEvent>,
}

impl ApiClient {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client: Client::new(),
            events_tx: tx,
            events_rx: rx,
        }
    }

    /// Non-blocking receive of the next completed backend event.
    pub fn poll_event(&mut self) -> Option<BackendEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Fetches agents and teams for `endpoint` and reports an
    /// [`BackendEvent::Initialized`] with the activity flag.
    ///
    /// The agent listing decides reachability; a missing team listing is
    /// tolerated since older backends do not expose one.
    pub fn initialize(&self, endpoint: String, token: Option<String>) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let (agents, teams) = tokio::join!(
                fetch_agents(&client, &endpoint, token.as_deref()),
                fetch_teams(&client, &endpoint, token.as_deref()),
            );
            let (agents, active) = match agents {
                Ok(agents) => (agents, true),
                Err(err) => {
                    warn!("initialize against {} failed: {}", endpoint, err);
                    (Vec::new(), false)
                }
            };
            let teams = teams.unwrap_or_else(|err| {
                debug!("team listing unavailable: {}", err);
                Vec::new()
            });
            let _ = tx.send(BackendEvent::Initialized {
                agents,
                teams,
                active,
            });
        });
    }

    /// Fetches the session list for the selected entity.
    pub fn fetch_sessions(
        &self,
        endpoint: String,
        token: Option<String>,
        mode: Mode,
        entity_id: String,
    ) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            match fetch_session_list(&client, &endpoint, token.as_deref(), mode, &entity_id).await
            {
                Ok(sessions) => {
                    let _ = tx.send(BackendEvent::Sessions(sessions));
                }
                Err(err) => {
                    let _ = tx.send(BackendEvent::Failed {
                        context: FailureContext::Sessions,
                        detail: err.to_string(),
                    });
                }
            }
        });
    }

    /// Loads a full session transcript.
    pub fn load_session(
        &self,
        endpoint: String,
        token: Option<String>,
        mode: Mode,
        entity_id: String,
        session_id: String,
    ) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            match fetch_session_detail(
                &client,
                &endpoint,
                token.as_deref(),
                mode,
                &entity_id,
                &session_id,
            )
            .await
            {
                Ok(detail) => {
                    let _ = tx.send(BackendEvent::SessionLoaded(detail));
                }
                Err(err) => {
                    let _ = tx.send(BackendEvent::Failed {
                        context: FailureContext::SessionLoad,
                        detail: err.to_string(),
                    });
                }
            }
        });
    }

    /// Deletes a session on the backend.
    pub fn delete_session(
        &self,
        endpoint: String,
        token: Option<String>,
        mode: Mode,
        entity_id: String,
        session_id: String,
    ) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            match delete_session_remote(
                &client,
                &endpoint,
                token.as_deref(),
                mode,
                &entity_id,
                &session_id,
            )
            .await
            {
                Ok(()) => {
                    let _ = tx.send(BackendEvent::SessionDeleted(session_id));
                }
                Err(err) => {
                    let _ = tx.send(BackendEvent::Failed {
                        context: FailureContext::SessionDelete,
                        detail: err.to_string(),
                    });
                }
            }
        });
    }

    /// Sends a user message to the selected entity.
    pub fn run(
        &self,
        endpoint: String,
        token: Option<String>,
        mode: Mode,
        entity_id: String,
        session_id: Option<String>,
        message: String,
    ) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            match run_entity(
                &client,
                &endpoint,
                token.as_deref(),
                mode,
                &entity_id,
                session_id.as_deref(),
                &message,
            )
            .await
            {
                Ok(response) => {
                    let _ = tx.send(BackendEvent::RunCompleted(response));
                }
                Err(err) => {
                    let _ = tx.send(BackendEvent::Failed {
                        context: FailureContext::Run,
                        detail: err.to_string(),
                    });
                }
            }
        });
    }

    /// Issues one status request per radar target concurrently and reports
    /// the merged cycle. A target whose request fails in transport yields
    /// code 0, distinct from "never checked".
    pub fn poll_radar(&self, targets: &'static [RadarTarget], token: Option<String>) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let checks = targets.iter().map(|target| {
                let client = client.clone();
                let token = token.clone();
                async move {
                    let code = fetch_status(&client, target.url, token.as_deref())
                        .await
                        .unwrap_or(0);
                    (target.key, code)
                }
            });
            let cycle = join_all(checks).await;
            let _ = tx.send(BackendEvent::RadarCycle(cycle));
        });
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) if !token.is_empty() => request.bearer_auth(token),
        _ => request,
    }
}

async fn read_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let detail = response.text().await.unwrap_or_default();
    ApiError::Status { status, detail }
}

/// Health check against a radar target: the response status code is the
/// signal, regardless of body.
pub async fn fetch_status(client: &Client, url: &str, token: Option<&str>) -> Result<u16, ApiError> {
    let response = with_bearer(client.get(url), token).send().await?;
    Ok(response.status().as_u16())
}

pub async fn fetch_agents(
    client: &Client,
    base: &str,
    token: Option<&str>,
) -> Result<Vec<AgentSummary>, ApiError> {
    let url = format!("{}/v1/agents", base);
    let response = with_bearer(client.get(&url), token).send().await?;
    if !response.status().is_success() {
        return Err(read_error(response).await);
    }
    Ok(response.json().await?)
}

pub async fn fetch_teams(
    client: &Client,
    base: &str,
    token: Option<&str>,
) -> Result<Vec<TeamSummary>, ApiError> {
    let url = format!("{}/v1/teams", base);
    let response = with_bearer(client.get(&url), token).send().await?;
    if !response.status().is_success() {
        return Err(read_error(response).await);
    }
    Ok(response.json().await?)
}

pub async fn fetch_session_list(
    client: &Client,
    base: &str,
    token: Option<&str>,
    mode: Mode,
    entity_id: &str,
) -> Result<Vec<SessionSummary>, ApiError> {
    let url = format!("{}/v1/{}/{}/sessions", base, mode.api_segment(), entity_id);
    let response = with_bearer(client.get(&url), token).send().await?;
    if !response.status().is_success() {
        return Err(read_error(response).await);
    }
    Ok(response.json().await?)
}

pub async fn fetch_session_detail(
    client: &Client,
    base: &str,
    token: Option<&str>,
    mode: Mode,
    entity_id: &str,
    session_id: &str,
) -> Result<SessionDetail, ApiError> {
    let url = format!(
        "{}/v1/{}/{}/sessions/{}",
        base,
        mode.api_segment(),
        entity_id,
        session_id
    );
    let response = with_bearer(client.get(&url), token).send().await?;
    if !response.status().is_success() {
        return Err(read_error(response).await);
    }
    Ok(response.json().await?)
}

pub async fn delete_session_remote(
    client: &Client,
    base: &str,
    token: Option<&str>,
    mode: Mode,
    entity_id: &str,
    session_id: &str,
) -> Result<(), ApiError> {
    let url = format!(
        "{}/v1/{}/{}/sessions/{}",
        base,
        mode.api_segment(),
        entity_id,
        session_id
    );
    let response = with_bearer(client.delete(&url), token).send().await?;
    if !response.status().is_success() {
        return Err(read_error(response).await);
    }
    Ok(())
}

pub async fn run_entity(
    client: &Client,
    base: &str,
    token: Option<&str>,
    mode: Mode,
    entity_id: &str,
    session_id: Option<&str>,
    message: &str,
) -> Result<RunResponse, ApiError> {
    let url = format!("{}/v1/{}/{}/runs", base, mode.api_segment(), entity_id);
    let payload = RunPayload {
        message,
        session_id,
    };
    let response = with_bearer(client.post(&url), token)
        .json(&payload)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(read_error(response).await);
    }
    Ok(response.json().await?)
}
