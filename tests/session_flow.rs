//! Session lifecycle against a mocked Wazuh API.

use reqwest::{Method, StatusCode};
use serde_json::json;
use wazuh_sdk::client::USER_AGENT;
use wazuh_sdk::{ClientConfig, SessionStatus, WazuhClient, WazuhError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(format!("{}/", server.uri()), "wazuh", "secret")
}

async fn mount_manager_info(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/manager/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_token(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/security/user/authenticate"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn initialize_detects_version_and_stores_token() {
    let server = MockServer::start().await;
    mount_manager_info(&server, json!({"data": {"version": "4.2.1"}})).await;
    mount_token(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "abc"}})),
    )
    .await;

    let mut client = WazuhClient::new(config(&server)).unwrap();
    client.initialize().await.unwrap();

    assert_eq!(client.state(), SessionStatus::Ready);
    assert_eq!(client.version(), Some("4.2.1"));
    assert_eq!(client.auth_header().as_deref(), Some("Bearer abc"));
    assert_eq!(client.base_url(), server.uri());

    client.close();
    client.close();
    assert_eq!(client.state(), SessionStatus::Closed);
    assert!(client.auth_header().is_none());
}

#[tokio::test]
async fn initialize_reads_version_from_affected_items() {
    let server = MockServer::start().await;
    mount_manager_info(
        &server,
        json!({"data": {"affected_items": [{"version": "v4.7.3"}], "total_affected_items": 1}}),
    )
    .await;
    mount_token(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "t"}})),
    )
    .await;

    let client = WazuhClient::connect(config(&server)).await.unwrap();
    assert_eq!(client.version(), Some("v4.7.3"));
    assert!(client.is_ready());
}

#[tokio::test]
async fn token_request_uses_basic_auth() {
    let server = MockServer::start().await;
    // base64("wazuh:secret")
    Mock::given(method("POST"))
        .and(path("/security/user/authenticate"))
        .and(header("Authorization", "Basic d2F6dWg6c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "abc"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = WazuhClient::connect(config(&server).with_version("4.2.1"))
        .await
        .unwrap();
    assert_eq!(client.auth_header().as_deref(), Some("Bearer abc"));
}

#[tokio::test]
async fn requests_carry_bearer_and_user_agent() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "abc"}})),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/agents"))
        .and(header("Authorization", "Bearer abc"))
        .and(header("User-Agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(2)
        .mount(&server)
        .await;

    let client = WazuhClient::connect(config(&server).with_version("4.2.1"))
        .await
        .unwrap();
    let url = client.resolve("list_agents", &[]).unwrap();

    // The session stays usable across requests.
    for _ in 0..2 {
        let body = client.request(Method::GET, &url, None, None).await.unwrap();
        assert_eq!(body, json!({"data": {}}));
    }
}

#[tokio::test]
async fn missing_version_is_a_connection_error() {
    let server = MockServer::start().await;
    mount_manager_info(&server, json!({"data": {}})).await;

    let mut client = WazuhClient::new(config(&server)).unwrap();
    let err = client.initialize().await.unwrap_err();
    assert!(matches!(err, WazuhError::Connection { .. }));
    assert_eq!(client.state(), SessionStatus::Created);
}

#[tokio::test]
async fn rejected_credentials_are_a_connection_error() {
    let server = MockServer::start().await;
    mount_token(&server, ResponseTemplate::new(401).set_body_string("Invalid credentials")).await;

    let mut client = WazuhClient::new(config(&server).with_version("4.2.1")).unwrap();
    let err = client.initialize().await.unwrap_err();
    assert!(matches!(err, WazuhError::Connection { .. }));
    assert!(!client.is_ready());

    // A failed attempt leaves the session re-initializable.
    server.reset().await;
    mount_token(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "second"}})),
    )
    .await;
    client.initialize().await.unwrap();
    assert_eq!(client.auth_header().as_deref(), Some("Bearer second"));
}

#[tokio::test]
async fn malformed_token_body_is_a_decode_error() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"data": {"jwt": "abc"}})),
    )
    .await;

    let mut client = WazuhClient::new(config(&server).with_version("4.2.1")).unwrap();
    let err = client.initialize().await.unwrap_err();
    assert!(matches!(err, WazuhError::Decode(_)));
    assert_eq!(client.state(), SessionStatus::Created);
}

#[tokio::test]
async fn v3_manager_has_no_token_endpoint() {
    let server = MockServer::start().await;
    mount_manager_info(&server, json!({"data": {"version": "3.13.2"}})).await;

    let mut client = WazuhClient::new(config(&server)).unwrap();
    let err = client.initialize().await.unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn non_success_status_carries_code_and_body() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "abc"}})),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = WazuhClient::connect(config(&server).with_version("4.2.1"))
        .await
        .unwrap();
    let url = client.resolve("list_agents", &[]).unwrap();
    let err = client.request(Method::GET, &url, None, None).await.unwrap_err();
    match err {
        WazuhError::HttpStatus { status, body } => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(body, "forbidden");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn reinitialize_refreshes_token() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "first"}})),
    )
    .await;

    let mut client = WazuhClient::connect(config(&server).with_version("4.2.1"))
        .await
        .unwrap();
    assert_eq!(client.auth_header().as_deref(), Some("Bearer first"));

    server.reset().await;
    mount_token(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "second"}})),
    )
    .await;
    client.initialize().await.unwrap();
    assert_eq!(client.auth_header().as_deref(), Some("Bearer second"));
}

#[tokio::test]
async fn non_json_success_body_is_a_connection_error() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "abc"}})),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = WazuhClient::connect(config(&server).with_version("4.2.1"))
        .await
        .unwrap();
    let url = client.resolve("list_agents", &[]).unwrap();
    let err = client.request(Method::GET, &url, None, None).await.unwrap_err();
    assert!(matches!(err, WazuhError::Connection { .. }));
}
