//! Typed access to the server's REST API.

use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use prism_core::error::ProtocolError;
use prism_core::{ApiUrl, Error, Result, SessionScope};

use crate::client::HttpClient;
use crate::endpoints::{CONFIG, ClientConfig, ErrorResponse};
use crate::error::transport;

/// REST API of one server, reached through an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct PhotoPrismApi {
    client: HttpClient,
    root: ApiUrl,
}

impl PhotoPrismApi {
    pub fn new(client: HttpClient, root: ApiUrl) -> Self {
        Self { client, root }
    }

    /// An API bound to the session of `scope`.
    pub fn for_scope(scope: &SessionScope) -> Result<Self> {
        let client = HttpClient::for_scope(scope)?;
        Ok(Self::new(client, scope.connection().root_url))
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn root(&self) -> &ApiUrl {
        &self.root
    }

    /// Fetch the client configuration.
    #[instrument(skip(self), fields(root_url = %self.root))]
    pub async fn client_config(&self) -> Result<ClientConfig> {
        debug!("Fetching client config");
        self.get_json(&self.root.api_url(CONFIG)).await
    }

    /// GET a path relative to the server root and decode the JSON body.
    #[instrument(skip(self), fields(root_url = %self.root))]
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.root.resolve(path);
        let response = self.client.get(&url).await?;
        handle_response(response).await
    }
}

async fn handle_response<R: DeserializeOwned>(response: Response) -> Result<R> {
    let status = response.status();
    trace!(status = %status, "API response");

    if status.is_success() {
        response.json::<R>().await.map_err(transport)
    } else {
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.error);
        Err(Error::Protocol(ProtocolError::new(status.as_u16(), message)))
    }
}
