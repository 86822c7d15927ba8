//! Stage renewing an expired session and retrying the request.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Request, Response, StatusCode};
use tracing::{debug, warn};

use prism_core::{Renewal, RenewalOutcome, Result, SessionStore};

use crate::endpoints::SESSION_PATH_SUFFIX;
use crate::pipeline::{Next, Stage};

/// Renews the session when the server answers `401 Unauthorized`, then
/// retries the request once.
///
/// Renewal goes through [`SessionStore::renew`], so concurrent requests
/// failing on the same expired session share a single login. If no
/// credentials are stored, the unauthorized response is returned as is.
/// Requests to the session endpoint itself pass straight through.
#[derive(Debug)]
pub struct SessionRenewalStage {
    store: Arc<SessionStore>,
    renewal: Renewal,
}

impl SessionRenewalStage {
    pub fn new(store: Arc<SessionStore>, renewal: Renewal) -> Self {
        Self { store, renewal }
    }
}

fn is_session_request(request: &Request) -> bool {
    request
        .url()
        .path()
        .trim_end_matches('/')
        .ends_with(SESSION_PATH_SUFFIX)
}

#[async_trait]
impl Stage for SessionRenewalStage {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response> {
        if is_session_request(&request) {
            return next.run(request).await;
        }

        let retry = request.try_clone();
        let seen = self.store.generation();

        let response = next.run(request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(retry) = retry else {
            warn!("Request body cannot be replayed, not renewing the session");
            return Ok(response);
        };

        match self.store.renew(seen, &self.renewal).await? {
            RenewalOutcome::NoAuth => Ok(response),
            RenewalOutcome::Renewed | RenewalOutcome::AlreadyRenewed => {
                drop(response);
                debug!(path = retry.url().path(), "Retrying request with renewed session");
                next.run(retry).await
            }
        }
    }
}
