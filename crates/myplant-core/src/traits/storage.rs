//! Persistence backend trait for the credential store.

use std::fmt;

use crate::error::StorageError;

/// The two values a backend persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The session cookie in its persisted form.
    Credential,
    /// The cached user profile as JSON.
    Profile,
}

impl StorageKey {
    /// Both keys, in the order they are cleared.
    pub const ALL: [StorageKey; 2] = [StorageKey::Credential, StorageKey::Profile];

    /// The entry name used by key-value backends.
    pub fn entry_name(self) -> &'static str {
        match self {
            StorageKey::Credential => "pb_auth_cookie",
            StorageKey::Profile => "pb_user_data",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entry_name())
    }
}

/// A single persistence tier.
///
/// Implementations report failures as [`StorageError`]; the credential store
/// decides whether to demote to the next tier.
pub trait StorageBackend: Send + Sync + fmt::Debug {
    /// Short name for logging, e.g. `"keyring"`.
    fn name(&self) -> &'static str;

    /// Read a value. `Ok(None)` means nothing is stored.
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing a missing value succeeds.
    fn remove(&self, key: StorageKey) -> Result<(), StorageError>;
}
