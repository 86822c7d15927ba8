//! Validated value types.

mod api_url;
mod connection;
mod session_id;

pub use api_url::ApiUrl;
pub use connection::ConnectionParams;
pub use session_id::SessionId;
