//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, storage: &Storage) -> Result<()> {
    let scope = storage.restore_scope()?;
    scope.sign_out().context("Failed to remove saved session")?;

    output::success("Logged out");
    Ok(())
}
