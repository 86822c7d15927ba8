//! Stage attaching the current session id to outgoing requests.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Request, Response};
use tracing::trace;

use prism_core::error::InvalidInputError;
use prism_core::{Result, SessionIdProvider};

use crate::pipeline::{Next, Stage};

/// Header carrying the session id.
pub const SESSION_ID_HEADER: HeaderName = HeaderName::from_static("x-session-id");

/// Sets [`SESSION_ID_HEADER`] on every request.
///
/// The id is read from the provider each time a request passes through, so
/// a renewal is picked up by the next request without rebuilding the client.
pub struct SessionAwarenessStage {
    session_id: SessionIdProvider,
}

impl SessionAwarenessStage {
    pub fn new(session_id: SessionIdProvider) -> Self {
        Self { session_id }
    }
}

#[async_trait]
impl Stage for SessionAwarenessStage {
    async fn handle(&self, mut request: Request, next: Next<'_>) -> Result<Response> {
        let id = (self.session_id)();
        let value =
            HeaderValue::from_str(id.as_str()).map_err(|e| InvalidInputError::SessionId {
                reason: e.to_string(),
            })?;
        request.headers_mut().insert(SESSION_ID_HEADER, value);
        trace!(path = request.url().path(), "Attached session id");

        next.run(request).await
    }
}

impl fmt::Debug for SessionAwarenessStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionAwarenessStage").finish_non_exhaustive()
    }
}
