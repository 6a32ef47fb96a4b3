//! myplant-core - Core types and traits for the MyPlant API client.

pub mod credential;
pub mod credentials;
pub mod error;
pub mod models;
pub mod traits;
pub mod types;

pub use credential::{AUTH_COOKIE, Credential};
pub use credentials::{Credentials, LoginRequest};
pub use error::{Error, MalformedCredentialError, StorageError};
pub use models::{
    Activity, ActivitySignup, PostWudjeRequest, RemoveRegistration, SignupKind, User, UserStatus,
    Wud, WudAuthor,
};
pub use traits::{StorageBackend, StorageKey};
pub use types::{BaseUrl, DEFAULT_BASE_URL};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
