//! prism-core - Session types and traits for the prism photo server client.
//!
//! The central type is [`SessionScope`]: the shared session of one server
//! environment, read by every outgoing request and renewed at most once at
//! a time when the server reports it expired.

pub mod auth;
pub mod error;
pub mod scope;
pub mod session;
pub mod traits;
pub mod types;

pub use auth::{Auth, Credentials};
pub use error::Error;
pub use scope::{
    Generation, Renewal, RenewalOutcome, SessionIdProvider, SessionScope, SessionStore,
};
pub use session::Session;
pub use traits::{MemoryPersistence, ObjectPersistence, SessionCreator};
pub use types::{ApiUrl, ConnectionParams, SessionId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
