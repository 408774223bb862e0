//! Integration tests for the AgentOS HTTP client against a mock server.

use std::time::Duration;

use mockito::Server;
use reqwest::Client;

use gnosis_tui::api::{
    fetch_agents, fetch_session_list, fetch_status, run_entity, ApiClient, ApiError, BackendEvent,
};
use gnosis_tui::app::Mode;

async fn wait_for_event(client: &mut ApiClient) -> BackendEvent {
    for _ in 0..200 {
        if let Some(event) = client.poll_event() {
            return event;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no backend event arrived");
}

#[tokio::test]
async fn fetch_status_returns_the_response_code() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .with_status(204)
        .create_async()
        .await;

    let client = Client::new();
    let code = fetch_status(&client, &server.url(), None)
        .await
        .expect("status");
    assert_eq!(code, 204);
}

#[tokio::test]
async fn fetch_status_passes_error_codes_through() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .with_status(503)
        .create_async()
        .await;

    let client = Client::new();
    let code = fetch_status(&client, &server.url(), None)
        .await
        .expect("status");
    assert_eq!(code, 503);
}

#[tokio::test]
async fn transport_failure_maps_to_the_down_sentinel() {
    // Nothing listens on this port; the caller converts the transport
    // error into the explicit "down" code.
    let client = Client::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .expect("client");
    let code = fetch_status(&client, "http://127.0.0.1:9", None)
        .await
        .unwrap_or(0);
    assert_eq!(code, 0);
}

#[tokio::test]
async fn fetch_status_sends_the_bearer_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .create_async()
        .await;

    let client = Client::new();
    let code = fetch_status(&client, &server.url(), Some("secret-token"))
        .await
        .expect("status");
    assert_eq!(code, 200);
    mock.assert_async().await;
}

#[tokio::test]
async fn fetch_agents_parses_the_listing() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/agents")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":"a1","name":"Agent One","model":"gpt-4o"},{"id":"a2","name":"Agent Two"}]"#)
        .create_async()
        .await;

    let client = Client::new();
    let agents = fetch_agents(&client, &server.url(), None)
        .await
        .expect("agents");
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].id, "a1");
    assert_eq!(agents[0].model.as_deref(), Some("gpt-4o"));
    assert!(agents[1].model.is_none());
}

#[tokio::test]
async fn fetch_agents_surfaces_backend_errors() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/agents")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = Client::new();
    let err = fetch_agents(&client, &server.url(), None)
        .await
        .expect_err("error");
    match err {
        ApiError::Status { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn session_list_uses_the_mode_segment() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/teams/t1/sessions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"session_id":"s1","title":"First"}]"#)
        .create_async()
        .await;

    let client = Client::new();
    let sessions = fetch_session_list(&client, &server.url(), None, Mode::Team, "t1")
        .await
        .expect("sessions");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].display_title(), "First");
    mock.assert_async().await;
}

#[tokio::test]
async fn run_posts_the_message_and_parses_the_reply() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/agents/a1/runs")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "message": "hello",
            "session_id": "s1",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"content":"hi there","session_id":"s1","model":"gpt-4o-mini"}"#)
        .create_async()
        .await;

    let client = Client::new();
    let response = run_entity(
        &client,
        &server.url(),
        None,
        Mode::Agent,
        "a1",
        Some("s1"),
        "hello",
    )
    .await
    .expect("run");
    assert_eq!(response.content, "hi there");
    assert_eq!(response.model.as_deref(), Some("gpt-4o-mini"));
    mock.assert_async().await;
}

#[tokio::test]
async fn initialize_reports_activity_and_tolerates_missing_teams() {
    let mut server = Server::new_async().await;
    let _agents = server
        .mock("GET", "/v1/agents")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":"a1","name":"Agent One"}]"#)
        .create_async()
        .await;
    let _teams = server
        .mock("GET", "/v1/teams")
        .with_status(404)
        .create_async()
        .await;

    let mut client = ApiClient::new();
    client.initialize(server.url(), None);
    match wait_for_event(&mut client).await {
        BackendEvent::Initialized {
            agents,
            teams,
            active,
        } => {
            assert!(active);
            assert_eq!(agents.len(), 1);
            assert!(teams.is_empty());
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn initialize_against_a_dead_endpoint_reports_inactive() {
    let mut client = ApiClient::new();
    client.initialize(String::from("http://127.0.0.1:9"), None);
    match wait_for_event(&mut client).await {
        BackendEvent::Initialized { active, agents, .. } => {
            assert!(!active);
            assert!(agents.is_empty());
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
