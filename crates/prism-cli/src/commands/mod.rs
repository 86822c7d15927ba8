//! Subcommand implementations.

pub mod config;
pub mod download;
pub mod get;
pub mod login;
pub mod logout;
pub mod whoami;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::storage::Storage;

pub async fn handle(cli: Cli) -> Result<()> {
    let storage = Storage::new(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Login(args) => login::run(args, &storage).await,
        Commands::Whoami(args) => whoami::run(args, &storage).await,
        Commands::Config(args) => config::run(args, &storage).await,
        Commands::Get(args) => get::run(args, &storage).await,
        Commands::Download(args) => download::run(args, &storage).await,
        Commands::Logout(args) => logout::run(args, &storage).await,
    }
}
