//! Downloads reporting their progress as a stream.

use futures_core::Stream;
use futures_util::StreamExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use prism_core::error::{Error, ProtocolError, StorageError};
use prism_core::Result;

use crate::client::HttpClient;
use crate::error::transport;

/// Progress of a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes written to the destination so far.
    pub bytes_read: u64,
    /// Total size, if the server announced it.
    pub content_length: Option<u64>,
}

impl Progress {
    /// Completion in percent, if the total size is known.
    pub fn percent(&self) -> Option<f64> {
        match self.content_length {
            Some(0) => Some(100.0),
            Some(total) => Some(self.bytes_read as f64 * 100.0 / total as f64),
            None => None,
        }
    }
}

/// Downloads files through a session-aware client.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: HttpClient,
}

impl Downloader {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Download `url` into `destination`.
    ///
    /// The returned stream yields a [`Progress`] after every chunk written
    /// and ends once the body is fully written and flushed. Nothing happens
    /// until the stream is polled; dropping it cancels the transfer.
    pub fn download<'a, W>(
        &'a self,
        url: &'a str,
        destination: W,
    ) -> impl Stream<Item = Result<Progress>> + Send + 'a
    where
        W: AsyncWrite + Unpin + Send + 'a,
    {
        async_stream::try_stream! {
            let mut destination = destination;
            let response = successful(self.client.get(url).await?)?;

            let content_length = response.content_length();
            debug!(?content_length, "Download started");

            let mut bytes_read = 0u64;
            let mut body = response.bytes_stream();
            while let Some(chunk) = body.next().await {
                let chunk = chunk.map_err(transport)?;
                destination.write_all(&chunk).await.map_err(write_error)?;
                bytes_read += chunk.len() as u64;
                yield Progress { bytes_read, content_length };
            }

            destination.flush().await.map_err(write_error)?;
            debug!(bytes_read, "Download finished");
        }
    }
}

fn successful(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ProtocolError::new(status.as_u16(), None).into())
    }
}

fn write_error(err: std::io::Error) -> Error {
    Error::Storage(StorageError::Io {
        path: "download destination".to_string(),
        message: err.to_string(),
    })
}
