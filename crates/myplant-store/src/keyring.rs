//! OS keyring tier.
//!
//! Stores the credential and profile as two entries under one service name:
//! - Windows: Credential Manager
//! - macOS: Keychain
//! - Linux: kernel keyutils

use keyring::Entry;
use tracing::debug;

use myplant_core::error::StorageError;
use myplant_core::traits::{StorageBackend, StorageKey};

const BACKEND: &str = "keyring";

/// Entry used to check that the keyring actually persists values.
const PROBE_ENTRY: &str = "probe";

fn keyring_error(err: keyring::Error) -> StorageError {
    StorageError::Keyring {
        message: err.to_string(),
    }
}

/// Keyring-backed storage tier.
#[derive(Debug, Clone)]
pub struct KeyringBackend {
    service: String,
}

impl KeyringBackend {
    /// Check that the platform keyring is usable and return a backend for it.
    ///
    /// The probe writes a value through one entry handle and reads it back
    /// through a fresh handle, which rejects keyrings that only keep values
    /// per handle.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if any step fails.
    pub fn probe(service: impl Into<String>) -> Result<Self, StorageError> {
        let backend = Self {
            service: service.into(),
        };
        let unavailable = |reason: String| StorageError::Unavailable {
            backend: BACKEND,
            reason,
        };

        let expected = format!("probe-{}", std::process::id());
        let writer = backend
            .entry_named(PROBE_ENTRY)
            .map_err(|e| unavailable(e.to_string()))?;
        writer
            .set_password(&expected)
            .map_err(|e| unavailable(e.to_string()))?;

        let readback = backend
            .entry_named(PROBE_ENTRY)
            .and_then(|reader| reader.get_password().map_err(keyring_error));

        if let Err(e) = writer.delete_credential() {
            debug!(error = %e, "Failed to remove keyring probe entry");
        }

        match readback {
            Ok(value) if value == expected => Ok(backend),
            Ok(_) => Err(unavailable("probe value did not round-trip".to_string())),
            Err(e) => Err(unavailable(e.to_string())),
        }
    }

    /// Returns the keyring service name.
    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry_named(&self, name: &str) -> Result<Entry, StorageError> {
        Entry::new(&self.service, name).map_err(keyring_error)
    }

    fn entry(&self, key: StorageKey) -> Result<Entry, StorageError> {
        self.entry_named(key.entry_name())
    }
}

impl StorageBackend for KeyringBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(keyring_error(e)),
        }
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        self.entry(key)?.set_password(value).map_err(keyring_error)
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(keyring_error(e)),
        }
    }
}
