//! Session creation against the server's session endpoint.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, instrument};

use prism_core::error::{AuthError, ProtocolError};
use prism_core::{Auth, ConnectionParams, Result, SessionCreator, SessionId};

use crate::awareness::SESSION_ID_HEADER;
use crate::client::HttpClient;
use crate::endpoints::{CreateSessionRequest, CreateSessionResponse, ErrorResponse, SESSION};
use crate::error::transport;

/// Creates sessions by posting credentials to `api/v1/session`.
///
/// Each call uses a plain client for the given connection, so login
/// requests never pass through the session stages.
#[derive(Debug, Clone, Default)]
pub struct PhotoPrismSessionCreator {
    _private: (),
}

impl PhotoPrismSessionCreator {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionCreator for PhotoPrismSessionCreator {
    #[instrument(skip_all, fields(root_url = %connection.root_url))]
    async fn create_session(
        &self,
        connection: &ConnectionParams,
        auth: &Auth,
    ) -> Result<SessionId> {
        let Auth::Credentials(credentials) = auth;
        info!(username = credentials.username(), "Creating session");

        let mut builder = HttpClient::builder();
        if let Some(path) = &connection.client_certificate {
            builder = builder.client_certificate(path);
        }
        let client = builder.build()?;

        let request = client
            .request(reqwest::Method::POST, &connection.root_url.api_url(SESSION))
            .json(&CreateSessionRequest {
                username: credentials.username(),
                password: credentials.password(),
            });
        let response = client.send(request).await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            let message = error_message(response).await;
            return Err(AuthError::InvalidCredentials(
                message.unwrap_or_else(|| status.to_string()),
            )
            .into());
        }
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(ProtocolError::new(status.as_u16(), message).into());
        }

        let header_id = response
            .headers()
            .get(SESSION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body: CreateSessionResponse = response.json().await.map_err(transport)?;

        let id = body.id.or(header_id).ok_or_else(|| {
            ProtocolError::new(
                status.as_u16(),
                Some("session response carries no id".to_string()),
            )
        })?;

        debug!("Session created successfully");
        SessionId::new(id)
    }
}

async fn error_message(response: reqwest::Response) -> Option<String> {
    response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.error)
}
