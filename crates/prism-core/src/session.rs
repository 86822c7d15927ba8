//! Session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ConnectionParams, SessionId};

/// A session with a server: the identifier the server issued plus the
/// parameters of the server it belongs to.
///
/// The identifier is the only part that changes over a session's life, when
/// an expired session is renewed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    connection: ConnectionParams,
    /// When the current identifier was issued.
    issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId, connection: ConnectionParams) -> Self {
        Self {
            id,
            connection,
            issued_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn connection(&self) -> &ConnectionParams {
        &self.connection
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Replace the identifier after a renewal.
    pub(crate) fn renew(&mut self, id: SessionId) {
        self.id = id;
        self.issued_at = Utc::now();
    }
}
