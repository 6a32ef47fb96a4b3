//! myplant - Client library for the MyPlant API
//!
//! A thin HTTP client over the MyPlant activity and Wudje endpoints. Login
//! yields a `pb_auth` session cookie, which is persisted in the best
//! available credential store and attached to every later request.
//!
//! # Example
//!
//! ```no_run
//! use myplant::{BaseUrl, MyPlantClient, PostWudjeRequest};
//!
//! # async fn example() -> Result<(), myplant::Error> {
//! let client = MyPlantClient::new(BaseUrl::default())?;
//! client.login("alice@example.com", "hunter2").await?;
//!
//! for activity in client.get_activities().await? {
//!     println!("{}: {}", activity.id, activity.title);
//! }
//!
//! client.post_wudje(&PostWudjeRequest::new("Hallo!")).await?;
//! client.logout();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoints;
mod resources;

pub use client::{ClientConfig, MyPlantClient};
pub use endpoints::{LoginData, LoginResponse};

// Re-export the core types so callers need only this crate
pub use myplant_core::error;
pub use myplant_core::{
    Activity, ActivitySignup, BaseUrl, Credential, Credentials, DEFAULT_BASE_URL, Error,
    PostWudjeRequest, RemoveRegistration, Result, SignupKind, User, UserStatus, Wud, WudAuthor,
};
pub use myplant_store::{CredentialStore, FileBackend, StoreConfig};
pub use reqwest::Method;
