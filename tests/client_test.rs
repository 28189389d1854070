//! Session client tests against a mock REST API

use secrecy::SecretString;
use serde_json::json;
use spectrum_virtualize_exporter::error::ExporterError;
use spectrum_virtualize_exporter::spectrum::types::Drive;
use spectrum_virtualize_exporter::spectrum::{SpectrumApi, SpectrumClient, Target};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn password() -> SecretString {
    SecretString::from("passw0rd")
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/rest/auth"))
        .and(header("X-Auth-Username", "monitor"))
        .and(header("X-Auth-Password", "passw0rd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_sends_credentials_in_headers() {
    // Given: An array accepting the monitor user
    let server = MockServer::start().await;
    mount_login(&server).await;
    let target = Target::parse(&server.uri()).unwrap();

    // When: Authenticating
    let client =
        SpectrumClient::authenticate(&reqwest::Client::new(), &target, "monitor", &password())
            .await;

    // Then: A session is established for that target
    let client = client.expect("login should succeed");
    assert_eq!(client.target(), &target);
}

#[tokio::test]
async fn test_login_rejected_status() {
    // Given: An array refusing the login
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/auth"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let target = Target::parse(&server.uri()).unwrap();

    // When: Authenticating
    let result =
        SpectrumClient::authenticate(&reqwest::Client::new(), &target, "monitor", &password())
            .await;

    // Then: The error names the unexpected status
    match result {
        Err(ExporterError::Auth { reason, .. }) => {
            assert_eq!(reason, "Login code was 403, expected 200");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("login should fail"),
    }
}

#[tokio::test]
async fn test_login_without_token_fails() {
    // Given: A login response that carries no token
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    let target = Target::parse(&server.uri()).unwrap();

    // When: Authenticating
    let result =
        SpectrumClient::authenticate(&reqwest::Client::new(), &target, "monitor", &password())
            .await;

    // Then: Authentication fails
    assert!(matches!(result, Err(ExporterError::Auth { .. })));
}

#[tokio::test]
async fn test_login_with_malformed_body_fails() {
    // Given: A login response that is not JSON
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;
    let target = Target::parse(&server.uri()).unwrap();

    // When: Authenticating
    let result =
        SpectrumClient::authenticate(&reqwest::Client::new(), &target, "monitor", &password())
            .await;

    // Then: Authentication fails
    assert!(matches!(result, Err(ExporterError::Auth { .. })));
}

#[tokio::test]
async fn test_fetch_posts_with_token() {
    // Given: A logged in session and a drive listing guarded by the token
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/lsdrive"))
        .and(header("X-Auth-Token", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "0", "status": "online", "enclosure_id": "1", "slot_id": "3"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let target = Target::parse(&server.uri()).unwrap();
    let client =
        SpectrumClient::authenticate(&reqwest::Client::new(), &target, "monitor", &password())
            .await
            .unwrap();

    // When: Fetching drives
    let drives: Vec<Drive> = client.get("/rest/lsdrive", None).await.unwrap();

    // Then: The records are decoded
    assert_eq!(drives.len(), 1);
    assert_eq!(drives[0].status, "online");
    assert_eq!(drives[0].slot_id, "3");
}

#[tokio::test]
async fn test_fetch_non_200_is_error() {
    // Given: A command that fails on the array
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/lsportfc"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let target = Target::parse(&server.uri()).unwrap();
    let client =
        SpectrumClient::authenticate(&reqwest::Client::new(), &target, "monitor", &password())
            .await
            .unwrap();

    // When: Fetching
    let result: Result<Vec<Drive>, _> = client.get("/rest/lsportfc", None).await;

    // Then: The error names the path and status
    let message = result.unwrap_err().to_string();
    assert!(message.contains("/rest/lsportfc"));
    assert!(message.contains("Response code was 500, expected 200"));
}

#[tokio::test]
async fn test_fetch_of_non_list_fails_decoding() {
    // Given: A command answering with an object instead of a list
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/lsdrive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "0"})))
        .mount(&server)
        .await;
    let target = Target::parse(&server.uri()).unwrap();
    let client =
        SpectrumClient::authenticate(&reqwest::Client::new(), &target, "monitor", &password())
            .await
            .unwrap();

    // When: Fetching drives
    let result: Result<Vec<Drive>, _> = client.get("/rest/lsdrive", None).await;

    // Then: Decoding fails as a fetch error
    assert!(matches!(result, Err(ExporterError::Fetch { .. })));
}
