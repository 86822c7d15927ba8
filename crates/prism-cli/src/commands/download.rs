//! Download command implementation.

use std::path::PathBuf;
use std::pin::pin;

use anyhow::{Context, Result};
use clap::Args;
use futures_util::StreamExt;

use prism_http::{Downloader, HttpClient};

use crate::output;
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// URL or path relative to the server root
    pub url: String,

    /// Destination file
    pub destination: PathBuf,
}

pub async fn run(args: DownloadArgs, storage: &Storage) -> Result<()> {
    let scope = storage.restore_scope()?;
    let url = scope.connection().root_url.resolve(&args.url);
    let downloader = Downloader::new(HttpClient::for_scope(&scope)?);

    let file = tokio::fs::File::create(&args.destination)
        .await
        .with_context(|| format!("Failed to create {}", args.destination.display()))?;

    let mut progress = pin!(downloader.download(&url, file));
    let mut bytes_read = 0;
    while let Some(update) = progress.next().await {
        let update = update.context("Download failed")?;
        bytes_read = update.bytes_read;
        output::progress(update.bytes_read, update.percent());
    }
    eprintln!();

    output::success(&format!(
        "Saved {} bytes to {}",
        bytes_read,
        args.destination.display()
    ));

    scope.close().context("Failed to save session")?;
    Ok(())
}
