//! Session identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// An opaque session identifier issued by the server.
///
/// The value grants access to the account, so it is never shown in Debug
/// output.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session id, rejecting values that cannot travel in an HTTP
    /// header.
    pub fn new(id: impl Into<String>) -> Result<Self, Error> {
        let id = id.into();
        if id.is_empty() {
            return Err(InvalidInputError::SessionId {
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if !id.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(InvalidInputError::SessionId {
                reason: "must be visible ASCII".to_string(),
            }
            .into());
        }
        Ok(Self(id))
    }

    /// Returns the raw value for use in request headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionId").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_hides_value_in_debug() {
        let id = SessionId::new("c0ffee1234").unwrap();
        let debug = format!("{:?}", id);
        assert!(!debug.contains("c0ffee"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn rejects_header_unsafe_ids() {
        assert!(SessionId::new("").is_err());
        assert!(SessionId::new("abc\r\nX-Evil: 1").is_err());
        assert!(SessionId::new("has space").is_err());
    }
}
