//! Session creation trait.

use async_trait::async_trait;

use crate::types::{ConnectionParams, SessionId};
use crate::{Auth, Result};

/// Exchanges credentials for a new session identifier.
///
/// Implementations hold no session state: the result depends only on the
/// arguments and the server's answer.
///
/// # Errors
///
/// Fails with [`AuthError::InvalidCredentials`](crate::error::AuthError) when
/// the server rejects the credentials and with a transport error when the
/// server cannot be reached.
#[async_trait]
pub trait SessionCreator: Send + Sync {
    async fn create_session(&self, connection: &ConnectionParams, auth: &Auth)
    -> Result<SessionId>;
}
