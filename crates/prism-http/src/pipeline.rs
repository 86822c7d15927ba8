//! Request pipeline: an ordered list of stages in front of a transport.
//!
//! Each [`Stage`] receives the request and a [`Next`] handle to the rest of
//! the pipeline. A stage may change the request, inspect the response, or
//! run the rest of the pipeline more than once.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Request, Response};

use prism_core::Result;

use crate::error::transport;

/// Sends a request over the network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn execute(&self, request: Request) -> Result<Response> {
        reqwest::Client::execute(self, request)
            .await
            .map_err(transport)
    }
}

/// One step of the pipeline.
#[async_trait]
pub trait Stage: Send + Sync {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response>;
}

/// The remainder of the pipeline after the current stage.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    transport: &'a dyn Transport,
    stages: &'a [Arc<dyn Stage>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(transport: &'a dyn Transport, stages: &'a [Arc<dyn Stage>]) -> Self {
        Self { transport, stages }
    }

    /// Run the request through the remaining stages and the transport.
    pub async fn run(self, request: Request) -> Result<Response> {
        match self.stages.split_first() {
            Some((stage, rest)) => {
                stage
                    .handle(
                        request,
                        Next {
                            transport: self.transport,
                            stages: rest,
                        },
                    )
                    .await
            }
            None => self.transport.execute(request).await,
        }
    }
}
