//! Connection parameters of a server environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ApiUrl;

/// Identifies the server a session belongs to and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// Root URL of the server.
    pub root_url: ApiUrl,
    /// PEM file holding a client certificate and its private key, for
    /// servers behind mutual TLS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate: Option<PathBuf>,
}

impl ConnectionParams {
    pub fn new(root_url: ApiUrl) -> Self {
        Self {
            root_url,
            client_certificate: None,
        }
    }

    pub fn with_client_certificate(mut self, path: impl Into<PathBuf>) -> Self {
        self.client_certificate = Some(path.into());
        self
    }
}
