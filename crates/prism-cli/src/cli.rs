//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{config, download, get, login, logout, whoami};

/// Photo server CLI with automatic session renewal.
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Directory holding the saved session and credentials
    #[arg(long, env = "PRISM_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new session and save it
    Login(login::LoginArgs),

    /// Display the saved session
    Whoami(whoami::WhoamiArgs),

    /// Fetch the client configuration
    Config(config::ConfigArgs),

    /// GET an API path and print the JSON response
    Get(get::GetArgs),

    /// Download a file with progress
    Download(download::DownloadArgs),

    /// Forget the saved session and credentials
    Logout(logout::LogoutArgs),
}
