//! Shared helpers for the mock server tests.

#![allow(dead_code)]

use std::sync::Arc;

use prism_core::{
    ApiUrl, Auth, ConnectionParams, Credentials, MemoryPersistence, ObjectPersistence, Session,
    SessionId, SessionScope,
};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Root URL of a mock server.
pub fn mock_root(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

pub fn session(server: &MockServer, id: &str) -> Session {
    Session::new(
        SessionId::new(id).unwrap(),
        ConnectionParams::new(mock_root(server)),
    )
}

pub fn credentials() -> Auth {
    Auth::from(Credentials::new("alice", "secret123"))
}

/// A persisted, renewable scope whose current session id is `id`.
pub fn renewable_scope(
    server: &MockServer,
    id: &str,
) -> (SessionScope, Arc<MemoryPersistence<Session>>) {
    let sessions = Arc::new(MemoryPersistence::with_item(session(server, id)));
    let auth: Arc<dyn ObjectPersistence<Auth>> =
        Arc::new(MemoryPersistence::with_item(credentials()));
    let scope = SessionScope::new(session(server, id), Some(sessions.clone()), Some(auth));
    (scope, sessions)
}

pub fn config_body() -> Value {
    json!({
        "downloadToken": "dl-token",
        "previewToken": "pv-token",
        "public": false
    })
}
