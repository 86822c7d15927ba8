//! Session creator tests against a mock server.

mod common;

use std::time::Duration;

use prism_core::error::AuthError;
use prism_core::{ConnectionParams, Error, SessionCreator};
use prism_http::PhotoPrismSessionCreator;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{credentials, mock_root};

#[tokio::test]
async fn creates_session_from_body_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/session"))
        .and(body_json(json!({
            "username": "alice",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a1b2c3",
            "config": { "downloadToken": "x", "previewToken": "y", "public": false }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let connection = ConnectionParams::new(mock_root(&server));
    let id = PhotoPrismSessionCreator::new()
        .create_session(&connection, &credentials())
        .await
        .unwrap();

    assert_eq!(id.as_str(), "a1b2c3");
}

#[tokio::test]
async fn falls_back_to_session_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/session"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Session-ID", "from-header")
                .set_body_json(json!({ "status": "ok" })),
        )
        .mount(&server)
        .await;

    let connection = ConnectionParams::new(mock_root(&server));
    let id = PhotoPrismSessionCreator::new()
        .create_session(&connection, &credentials())
        .await
        .unwrap();

    assert_eq!(id.as_str(), "from-header");
}

#[tokio::test]
async fn rejected_credentials_are_an_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/session"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let connection = ConnectionParams::new(mock_root(&server));
    let err = PhotoPrismSessionCreator::new()
        .create_session(&connection, &credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials(_))));
    assert!(err.to_string().contains("Invalid credentials"));
}

#[tokio::test]
async fn server_errors_are_protocol_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/session"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let connection = ConnectionParams::new(mock_root(&server));
    let err = PhotoPrismSessionCreator::new()
        .create_session(&connection, &credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Protocol(ref e) if e.status == 503));
}

#[tokio::test]
async fn response_without_id_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let connection = ConnectionParams::new(mock_root(&server));
    let err = PhotoPrismSessionCreator::new()
        .create_session(&connection, &credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Protocol(_)));
}

#[tokio::test]
async fn missing_client_certificate_fails_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/session"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(10)))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let connection = ConnectionParams::new(mock_root(&server))
        .with_client_certificate(dir.path().join("missing.pem"));
    let err = PhotoPrismSessionCreator::new()
        .create_session(&connection, &credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}
