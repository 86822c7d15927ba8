//! REST endpoint names and request/response bodies.

use serde::{Deserialize, Serialize};

/// `POST api/v1/session` creates a session, `DELETE` ends it.
pub const SESSION: &str = "session";

/// `GET api/v1/config` returns the client configuration.
pub const CONFIG: &str = "config";

/// Path suffix identifying requests to the session endpoint.
pub(crate) const SESSION_PATH_SUFFIX: &str = "/api/v1/session";

/// Request body for session creation.
#[derive(Debug, Serialize)]
pub(crate) struct CreateSessionRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from session creation.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateSessionResponse {
    #[serde(default)]
    pub id: Option<String>,
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

/// Client configuration published by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Token to append to original file download URLs.
    pub download_token: String,
    /// Token to append to thumbnail URLs.
    pub preview_token: String,
    /// True if the server runs without authentication.
    pub public: bool,
}
