//! Config command implementation.

use anyhow::{Context, Result};
use clap::Args;

use prism_http::PhotoPrismApi;

use crate::output;
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct ConfigArgs {}

pub async fn run(_args: ConfigArgs, storage: &Storage) -> Result<()> {
    let scope = storage.restore_scope()?;
    let api = PhotoPrismApi::for_scope(&scope)?;

    let config = api
        .client_config()
        .await
        .context("Failed to fetch client config")?;
    output::json_pretty(&config)?;

    scope.close().context("Failed to save session")?;
    Ok(())
}
