//! Session-aware HTTP client.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Request, RequestBuilder, Response};
use tracing::{debug, instrument};

use prism_core::{Renewal, Result, SessionIdProvider, SessionScope, SessionStore};

use crate::awareness::SessionAwarenessStage;
use crate::creator::PhotoPrismSessionCreator;
use crate::error::{tls, transport};
use crate::pipeline::{Next, Stage, Transport};
use crate::renewal::SessionRenewalStage;

/// Session settings of a client.
pub struct SessionAwareness {
    session_id: SessionIdProvider,
    renewal: Option<(Arc<SessionStore>, Renewal)>,
}

impl SessionAwareness {
    /// Attach the id read from `session_id` to every request.
    pub fn new(session_id: SessionIdProvider) -> Self {
        Self {
            session_id,
            renewal: None,
        }
    }

    /// Also renew the session held by `store` when the server rejects it.
    pub fn with_renewal(mut self, store: Arc<SessionStore>, renewal: Renewal) -> Self {
        self.renewal = Some((store, renewal));
        self
    }
}

/// HTTP client running every request through the session pipeline.
///
/// Cloning is cheap; clones share the connection pool and the pipeline.
///
/// # Example
///
/// ```no_run
/// use prism_core::SessionScope;
/// use prism_http::HttpClient;
///
/// # async fn example(scope: &SessionScope) -> Result<(), prism_core::Error> {
/// let client = HttpClient::for_scope(scope)?;
/// let response = client.get("https://photos.example.com/api/v1/config").await?;
/// println!("{}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    stages: Arc<[Arc<dyn Stage>]>,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// A client without session awareness, for public servers and logins.
    pub fn anonymous() -> Result<Self> {
        Self::builder().build()
    }

    /// A client bound to the session of `scope`.
    ///
    /// Renewal is enabled when the scope has stored credentials.
    pub fn for_scope(scope: &SessionScope) -> Result<Self> {
        let connection = scope.connection();
        let mut awareness = SessionAwareness::new(scope.id_provider());
        if let Some(renewal) = scope.renewal(Arc::new(PhotoPrismSessionCreator::new())) {
            awareness = awareness.with_renewal(Arc::clone(scope.store()), renewal);
        }

        let mut builder = Self::builder().session_awareness(awareness);
        if let Some(path) = connection.client_certificate {
            builder = builder.client_certificate(path);
        }
        builder.build()
    }

    /// Start building a request. Send it with [`send`](Self::send).
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Build and send a request through the pipeline.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build().map_err(transport)?;
        self.execute(request).await
    }

    /// Send a GET request through the pipeline.
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.send(self.request(Method::GET, url)).await
    }

    /// Send a request through the pipeline.
    #[instrument(skip_all, fields(method = %request.method(), path = request.url().path()))]
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let response = Next::new(&self.client as &dyn Transport, &self.stages)
            .run(request)
            .await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("stages", &self.stages.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`HttpClient`].
pub struct HttpClientBuilder {
    session_awareness: Option<SessionAwareness>,
    client_certificate: Option<PathBuf>,
    timeout: Option<Duration>,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            session_awareness: None,
            client_certificate: None,
            timeout: None,
            user_agent: concat!("prism/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientBuilder {
    pub fn session_awareness(mut self, awareness: SessionAwareness) -> Self {
        self.session_awareness = Some(awareness);
        self
    }

    /// Present the certificate and key from a PEM file for mutual TLS.
    pub fn client_certificate(mut self, path: impl Into<PathBuf>) -> Self {
        self.client_certificate = Some(path.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(path) = &self.client_certificate {
            let pem = std::fs::read(path).map_err(|e| {
                tls(format!(
                    "cannot read client certificate {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let identity = reqwest::Identity::from_pem(&pem).map_err(|e| tls(e.to_string()))?;
            builder = builder.identity(identity);
        }

        let client = builder.build().map_err(transport)?;

        // Renewal goes first so that a retried request passes through the
        // awareness stage again and picks up the renewed id.
        let mut stages: Vec<Arc<dyn Stage>> = Vec::new();
        if let Some(awareness) = self.session_awareness {
            if let Some((store, renewal)) = awareness.renewal {
                stages.push(Arc::new(SessionRenewalStage::new(store, renewal)));
            }
            stages.push(Arc::new(SessionAwarenessStage::new(awareness.session_id)));
        }

        Ok(HttpClient {
            client,
            stages: stages.into(),
        })
    }
}
