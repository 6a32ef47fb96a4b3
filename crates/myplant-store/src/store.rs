//! The tiered credential store.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use myplant_core::traits::{StorageBackend, StorageKey};
use myplant_core::{Credential, User};

use crate::file::FileBackend;
use crate::keyring::KeyringBackend;
use crate::memory::MemoryBackend;

/// Default keyring service name.
pub const DEFAULT_SERVICE: &str = "myplant";

/// Where the store may persist the credential.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Keyring service name.
    pub service: String,
    /// Credential file for the filesystem tier. `None` skips that tier.
    pub file_path: Option<PathBuf>,
    /// Whether to probe the OS keyring at all.
    pub keyring: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            file_path: FileBackend::default_path(),
            keyring: true,
        }
    }
}

/// Persists one credential and an optional user profile.
///
/// The store holds an ordered list of tiers, built once at construction. A
/// write goes to the first tier that accepts it and is then removed from all
/// other tiers, so exactly one tier holds each value. Reads take the first
/// tier that has a value. Backend failures are logged and never returned:
/// an empty store is always a valid state.
///
/// # Example
///
/// ```
/// use myplant_core::Credential;
/// use myplant_store::CredentialStore;
///
/// let store = CredentialStore::in_memory();
/// store.save(&Credential::new("ABC123", None), None);
/// assert_eq!(store.load().unwrap().token(), "ABC123");
///
/// store.clear();
/// assert!(store.load().is_none());
/// ```
pub struct CredentialStore {
    tiers: Vec<Box<dyn StorageBackend>>,
}

impl CredentialStore {
    /// Probe the available tiers in priority order: keyring, file, memory.
    ///
    /// Tiers whose probe fails are skipped. Never fails; memory is the
    /// universal fallback.
    pub fn detect(config: &StoreConfig) -> Self {
        let mut tiers: Vec<Box<dyn StorageBackend>> = Vec::new();

        if config.keyring {
            match KeyringBackend::probe(&config.service) {
                Ok(backend) => tiers.push(Box::new(backend)),
                Err(e) => debug!(error = %e, "Keyring tier unavailable"),
            }
        }

        match &config.file_path {
            Some(path) => match FileBackend::probe(path) {
                Ok(backend) => tiers.push(Box::new(backend)),
                Err(e) => debug!(path = %path.display(), error = %e, "File tier unavailable"),
            },
            None => debug!("No data directory, file tier unavailable"),
        }

        let store = Self::with_backends(tiers);
        info!(backend = store.active_backend(), "Credential store ready");
        store
    }

    /// Build a store from explicit tiers, highest priority first.
    ///
    /// A memory tier is appended unless one is already present.
    pub fn with_backends(mut tiers: Vec<Box<dyn StorageBackend>>) -> Self {
        if !tiers.iter().any(|t| t.name() == MemoryBackend::NAME) {
            tiers.push(Box::new(MemoryBackend::new()));
        }
        Self { tiers }
    }

    /// A store that only keeps values for the life of the process.
    pub fn in_memory() -> Self {
        Self::with_backends(Vec::new())
    }

    /// Name of the highest-priority tier.
    pub fn active_backend(&self) -> &'static str {
        self.tiers
            .first()
            .map_or(MemoryBackend::NAME, |tier| tier.name())
    }

    /// Names of all tiers, highest priority first.
    pub fn backends(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|tier| tier.name()).collect()
    }

    /// Persist a credential, and the profile when one is given.
    ///
    /// A profile of `None` leaves any cached profile in place.
    pub fn save(&self, credential: &Credential, profile: Option<&User>) {
        self.put(StorageKey::Credential, &credential.to_cookie_string());

        if let Some(user) = profile {
            match serde_json::to_string(user) {
                Ok(json) => self.put(StorageKey::Profile, &json),
                Err(e) => warn!(error = %e, "Failed to serialize user profile"),
            }
        }
    }

    /// The most recently saved credential, if any.
    ///
    /// A stored value that no longer parses is skipped in favour of the next
    /// tier.
    pub fn load(&self) -> Option<Credential> {
        self.get(StorageKey::Credential, |raw| raw.parse::<Credential>())
    }

    /// The cached user profile, if any.
    pub fn load_profile(&self) -> Option<User> {
        self.get(StorageKey::Profile, |raw| serde_json::from_str::<User>(raw))
    }

    /// Erase the credential and the profile from every tier.
    pub fn clear(&self) {
        for tier in &self.tiers {
            for key in StorageKey::ALL {
                if let Err(e) = tier.remove(key) {
                    warn!(backend = tier.name(), %key, error = %e, "Failed to clear stored value");
                }
            }
        }
        debug!("Credential store cleared");
    }

    fn put(&self, key: StorageKey, value: &str) {
        let Some(stored_at) = self.tiers.iter().position(|tier| match tier.write(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(backend = tier.name(), %key, error = %e, "Write failed, trying next tier");
                false
            }
        }) else {
            warn!(%key, "No storage tier accepted the write");
            return;
        };

        debug!(backend = self.tiers[stored_at].name(), %key, "Stored value");

        for (index, tier) in self.tiers.iter().enumerate() {
            if index == stored_at {
                continue;
            }
            if let Err(e) = tier.remove(key) {
                debug!(backend = tier.name(), %key, error = %e, "Failed to remove stale value");
            }
        }
    }

    /// First tier holding a value that `parse` accepts.
    fn get<T, E>(&self, key: StorageKey, parse: impl Fn(&str) -> Result<T, E>) -> Option<T>
    where
        E: fmt::Display,
    {
        self.tiers.iter().find_map(|tier| match tier.read(key) {
            Ok(Some(raw)) => match parse(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(backend = tier.name(), %key, error = %e, "Ignoring malformed stored value");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(backend = tier.name(), %key, error = %e, "Read failed, trying next tier");
                None
            }
        })
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("tiers", &self.backends())
            .finish()
    }
}
