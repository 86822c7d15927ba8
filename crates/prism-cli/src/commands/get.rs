//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use prism_http::PhotoPrismApi;

use crate::output;
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Path relative to the server root, e.g. api/v1/photos?count=10
    pub path: String,
}

pub async fn run(args: GetArgs, storage: &Storage) -> Result<()> {
    let scope = storage.restore_scope()?;
    let api = PhotoPrismApi::for_scope(&scope)?;

    let value: Value = api
        .get_json(&args.path)
        .await
        .with_context(|| format!("Failed to fetch {}", args.path))?;
    output::json_pretty(&value)?;

    scope.close().context("Failed to save session")?;
    Ok(())
}
