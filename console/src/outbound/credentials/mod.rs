//! File-backed credential storage.
//!
//! Each key is one file inside a capability-scoped directory. Writes are
//! atomic and owner-only on Unix.

mod atomic_io;

use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use crate::domain::ports::{CredentialStore, CredentialStoreError};

/// Credential store keeping one file per key under a directory.
#[derive(Debug)]
pub struct FileCredentialStore {
    dir: Dir,
    location: Utf8PathBuf,
}

impl FileCredentialStore {
    /// Open `path`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError::Unavailable`] when the directory cannot
    /// be created or opened.
    pub fn open(path: &Utf8Path) -> Result<Self, CredentialStoreError> {
        let unavailable =
            |error: io::Error| CredentialStoreError::unavailable(path.as_str(), error.to_string());
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(unavailable)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(unavailable)?;
        Ok(Self::from_dir(dir, path))
    }

    /// Wrap an already opened directory; `location` is only used in messages.
    pub fn from_dir(dir: Dir, location: &Utf8Path) -> Self {
        Self {
            dir,
            location: location.to_path_buf(),
        }
    }

    /// Directory the store writes into.
    pub fn location(&self) -> &Utf8Path {
        self.location.as_path()
    }
}

fn validate_key(key: &str) -> Result<&str, CredentialStoreError> {
    let mut components = Utf8Path::new(key).components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(name)), None) if name == key && !name.starts_with('.') => {
            Ok(name)
        }
        _ => Err(CredentialStoreError::invalid_key(key)),
    }
}

impl CredentialStore for FileCredentialStore {
    fn read(&self, key: &str) -> Result<Option<String>, CredentialStoreError> {
        let name = validate_key(key)?;
        match self.dir.read_to_string(name) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(CredentialStoreError::read(key, error.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CredentialStoreError> {
        let name = validate_key(key)?;
        atomic_io::write_atomic(&self.dir, name, value)
            .map_err(|error| CredentialStoreError::write(key, error.to_string()))?;
        debug!(key, location = %self.location, "stored credential");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CredentialStoreError> {
        let name = validate_key(key)?;
        match self.dir.remove_file(name) {
            Ok(()) => {
                debug!(key, location = %self.location, "removed credential");
                Ok(())
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(CredentialStoreError::write(key, error.to_string())),
        }
    }
}
