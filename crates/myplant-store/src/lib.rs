//! myplant-store - Tiered credential persistence.
//!
//! The store keeps the session credential and the cached user profile in the
//! best tier the host offers:
//!
//! 1. the OS keyring,
//! 2. a file pair in the user's data directory,
//! 3. process memory.
//!
//! Tiers are probed once when the store is built. Storage failures never
//! surface to callers; a failing tier is skipped for that call.

mod file;
mod keyring;
mod memory;
mod store;

pub use self::file::FileBackend;
pub use self::keyring::KeyringBackend;
pub use self::memory::MemoryBackend;
pub use self::store::{CredentialStore, DEFAULT_SERVICE, StoreConfig};
