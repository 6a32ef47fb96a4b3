//! In-process tier. Always available, lost on exit.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use myplant_core::error::StorageError;
use myplant_core::traits::{StorageBackend, StorageKey};

/// Volatile storage tier owned by a single credential store.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryBackend {
    pub const NAME: &'static str = "memory";

    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> MutexGuard<'_, HashMap<StorageKey, String>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.values().get(&key).cloned())
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        self.values().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.values().remove(&key);
        Ok(())
    }
}
