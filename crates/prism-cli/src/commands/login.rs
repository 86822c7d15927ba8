//! Login command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use prism_core::{
    ApiUrl, Auth, ConnectionParams, Credentials, ObjectPersistence, Session, SessionCreator,
};
use prism_http::PhotoPrismSessionCreator;

use crate::output;
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Root URL of the server
    #[arg(long, env = "PRISM_URL")]
    pub url: String,

    /// Username to authenticate with
    #[arg(long, env = "PRISM_USERNAME")]
    pub username: String,

    /// Password to authenticate with
    #[arg(long, env = "PRISM_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// PEM file with a client certificate and key for mutual TLS
    #[arg(long)]
    pub client_cert: Option<PathBuf>,

    /// Do not store the password; the session cannot be renewed once it
    /// expires
    #[arg(long)]
    pub no_save_password: bool,
}

pub async fn run(args: LoginArgs, storage: &Storage) -> Result<()> {
    let root_url = ApiUrl::new(&args.url).context("Invalid server URL")?;
    let mut connection = ConnectionParams::new(root_url);
    if let Some(path) = args.client_cert {
        connection = connection.with_client_certificate(path);
    }
    let auth = Auth::from(Credentials::new(&args.username, &args.password));

    eprintln!("{}", "Logging in...".dimmed());

    let id = PhotoPrismSessionCreator::new()
        .create_session(&connection, &auth)
        .await
        .context("Failed to login")?;
    let session = Session::new(id, connection);

    storage
        .sessions()
        .save_item(&session)
        .context("Failed to save session")?;

    let auth_storage = storage.auth();
    if args.no_save_password {
        auth_storage.clear().context("Failed to clear credentials")?;
    } else {
        auth_storage
            .save_item(&auth)
            .context("Failed to save credentials")?;
    }

    output::success("Logged in successfully");
    println!();
    output::field("Server", session.connection().root_url.as_str());
    output::field("User", &args.username);

    Ok(())
}
