//! Filesystem tier.
//!
//! The credential lives in one file and the profile in a sibling
//! `<file>.user`. Writes go through a temporary file in the same directory
//! and are renamed into place.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tempfile::NamedTempFile;

use myplant_core::error::StorageError;
use myplant_core::traits::{StorageBackend, StorageKey};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

const BACKEND: &str = "file";

/// File name of the credential inside the data directory.
const CREDENTIAL_FILE: &str = "credential";

/// Suffix of the profile file next to the credential file.
const PROFILE_SUFFIX: &str = ".user";

/// File-pair storage tier.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend for the given credential file path without probing.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The default credential path in the platform data directory.
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "myplant").map(|dirs| dirs.data_dir().join(CREDENTIAL_FILE))
    }

    /// Check that the credential directory can be created and written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the directory cannot be
    /// created or a scratch file cannot be written in it.
    pub fn probe(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let backend = Self::new(path);
        let unavailable = |reason: String| StorageError::Unavailable {
            backend: BACKEND,
            reason,
        };

        let dir = backend.dir();
        fs::create_dir_all(&dir).map_err(|e| unavailable(e.to_string()))?;
        // Dropping the scratch file deletes it.
        NamedTempFile::new_in(&dir).map_err(|e| unavailable(e.to_string()))?;

        Ok(backend)
    }

    /// Returns the credential file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the profile file path (`<credential file>.user`).
    pub fn profile_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(PROFILE_SUFFIX);
        PathBuf::from(name)
    }

    fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        match key {
            StorageKey::Credential => self.path.clone(),
            StorageKey::Profile => self.profile_path(),
        }
    }
}

impl StorageBackend for FileBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => Ok(Some(contents.trim_end().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        let dir = self.dir();
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;

        // Restrict to the owner before the file becomes visible
        #[cfg(unix)]
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))?;

        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
