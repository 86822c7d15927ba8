//! prism-http - Session-aware HTTP pipeline for prism.
//!
//! Requests made through an [`HttpClient`] built for a
//! [`SessionScope`](prism_core::SessionScope) carry the current session id in
//! the `X-Session-ID` header. When the server rejects the session, it is
//! renewed once with the stored credentials and the request is retried.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use prism_core::{
//!     ApiUrl, Auth, ConnectionParams, Credentials, MemoryPersistence, Session,
//!     SessionCreator, SessionScope,
//! };
//! use prism_http::{PhotoPrismApi, PhotoPrismSessionCreator};
//!
//! # async fn example() -> Result<(), prism_core::Error> {
//! let connection = ConnectionParams::new(ApiUrl::new("https://photos.example.com")?);
//! let auth = Auth::from(Credentials::new("alice", "app-password"));
//! let id = PhotoPrismSessionCreator::new()
//!     .create_session(&connection, &auth)
//!     .await?;
//!
//! let scope = SessionScope::new(
//!     Session::new(id, connection),
//!     None,
//!     Some(Arc::new(MemoryPersistence::with_item(auth))),
//! );
//! let api = PhotoPrismApi::for_scope(&scope)?;
//! let config = api.client_config().await?;
//! println!("public: {}", config.public);
//! # Ok(())
//! # }
//! ```

mod api;
mod awareness;
mod client;
mod creator;
mod download;
mod endpoints;
mod error;
mod pipeline;
mod renewal;

pub use api::PhotoPrismApi;
pub use awareness::{SESSION_ID_HEADER, SessionAwarenessStage};
pub use client::{HttpClient, HttpClientBuilder, SessionAwareness};
pub use creator::PhotoPrismSessionCreator;
pub use download::{Downloader, Progress};
pub use endpoints::{CONFIG, ClientConfig, SESSION};
pub use pipeline::{Next, Stage, Transport};
pub use renewal::SessionRenewalStage;
