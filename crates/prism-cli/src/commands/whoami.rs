//! Whoami command implementation.

use anyhow::Result;
use clap::Args;

use prism_core::ObjectPersistence;

use crate::output;
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, storage: &Storage) -> Result<()> {
    let scope = storage.restore_scope()?;
    let session = scope.session();

    output::field("Server", session.connection().root_url.as_str());
    output::field("Since", &session.issued_at().to_rfc3339());
    if let Some(path) = &session.connection().client_certificate {
        output::field("Client certificate", &path.display().to_string());
    }
    let renewal = if storage.auth().has_item() {
        "enabled"
    } else {
        "disabled"
    };
    output::field("Renewal", renewal);

    Ok(())
}
