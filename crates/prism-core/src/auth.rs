//! Credentials used to create sessions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stored authentication data, exchanged for a new session when the
/// current one expires.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Auth {
    /// Username and password login.
    Credentials(Credentials),
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Credentials(credentials) => f
                .debug_tuple("Auth::Credentials")
                .field(credentials)
                .finish(),
        }
    }
}

impl From<Credentials> for Auth {
    fn from(credentials: Credentials) -> Self {
        Auth::Credentials(credentials)
    }
}

/// Login credentials.
///
/// The password is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use prism_core::Credentials;
///
/// let creds = Credentials::new("alice", "hunter2");
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// Use this only when building the login request. Never log it.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
