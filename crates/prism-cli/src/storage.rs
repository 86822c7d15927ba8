//! Location of the saved session and credentials.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use prism_core::{Auth, ObjectPersistence, Session, SessionScope};
use prism_file::FilePersistence;

/// Files holding the CLI's persistent state.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Use `dir`, or the platform data directory if none is given.
    pub fn new(dir: Option<&Path>) -> Result<Self> {
        let dir = match dir {
            Some(dir) => dir.to_path_buf(),
            None => ProjectDirs::from("", "", "prism")
                .context("Could not determine data directory")?
                .data_dir()
                .to_path_buf(),
        };

        fs::create_dir_all(&dir).context("Failed to create data directory")?;
        debug!(dir = %dir.display(), "Using data directory");
        Ok(Self { dir })
    }

    pub fn sessions(&self) -> Arc<dyn ObjectPersistence<Session>> {
        Arc::new(FilePersistence::<Session>::new(self.dir.join("session.json")))
    }

    pub fn auth(&self) -> Arc<dyn ObjectPersistence<Auth>> {
        Arc::new(FilePersistence::<Auth>::new(self.dir.join("auth.json")))
    }

    /// Restore the saved scope, failing with a hint if there is none.
    pub fn restore_scope(&self) -> Result<SessionScope> {
        SessionScope::restore(self.sessions(), Some(self.auth()))
            .context("Failed to load session")?
            .context("No active session. Run 'prism login' first.")
    }
}
