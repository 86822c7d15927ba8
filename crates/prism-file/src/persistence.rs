//! JSON file persistence.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use prism_core::Result;
use prism_core::error::{Error, StorageError};
use prism_core::traits::ObjectPersistence;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn map_io(path: &Path, err: std::io::Error) -> Error {
    Error::Storage(StorageError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// On-disk envelope around the stored object.
#[derive(Debug, Serialize, Deserialize)]
struct Stored<T> {
    saved_at: DateTime<Utc>,
    item: T,
}

/// Stores one object as a JSON document in a file.
///
/// Writes go to a temporary file that is renamed over the target while an
/// exclusive lock is held on a sibling `.lock` file, so readers never see a
/// partially written document. On Unix the file is readable by the owner
/// only, since it may hold session ids or passwords.
#[derive(Debug, Clone)]
pub struct FilePersistence<T> {
    path: PathBuf,
    _item: PhantomData<fn() -> T>,
}

impl<T> FilePersistence<T> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _item: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn with_lock<R>(&self, f: impl FnOnce() -> Result<R>) -> Result<R> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| map_io(&lock_path, e))?;

        lock_file
            .lock_exclusive()
            .map_err(|e| map_io(&lock_path, e))?;
        let result = f();
        lock_file.unlock().map_err(|e| map_io(&lock_path, e))?;
        result
    }

    fn write_atomically(&self, contents: &str) -> Result<()> {
        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("item");
        let tmp_path = self
            .path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));

        let mut file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&tmp_path)
            .map_err(|e| map_io(&tmp_path, e))?;

        #[cfg(unix)]
        {
            let mut perms = file
                .metadata()
                .map_err(|e| map_io(&tmp_path, e))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp_path, perms).map_err(|e| map_io(&tmp_path, e))?;
        }

        file.write_all(contents.as_bytes())
            .and_then(|_| file.sync_data())
            .map_err(|e| map_io(&tmp_path, e))?;
        drop(file);

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            map_io(&self.path, e)
        })
    }
}

impl<T> ObjectPersistence<T> for FilePersistence<T>
where
    T: Serialize + DeserializeOwned,
{
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_item(&self) -> Result<Option<T>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io(&self.path, e)),
        };

        let stored: Stored<T> = serde_json::from_str(&json).map_err(StorageError::from)?;
        debug!(saved_at = %stored.saved_at, "Loaded stored item");
        Ok(Some(stored.item))
    }

    #[instrument(skip(self, item), fields(path = %self.path.display()))]
    fn save_item(&self, item: &T) -> Result<()> {
        let stored = Stored {
            saved_at: Utc::now(),
            item,
        };
        let json = serde_json::to_string_pretty(&stored).map_err(StorageError::from)?;

        self.with_lock(|| self.write_atomically(&json))?;
        debug!("Saved item");
        Ok(())
    }

    fn has_item(&self) -> bool {
        self.path.is_file()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<()> {
        self.with_lock(|| match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(&self.path, e)),
        })?;
        let _ = fs::remove_file(self.lock_path());
        debug!("Cleared item");
        Ok(())
    }
}
