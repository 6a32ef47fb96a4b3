//! Login credentials type.

use std::fmt;

use serde::Serialize;

/// Username and password for a MyPlant login.
///
/// The server expects the username in the `email` field of the login body.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use myplant_core::Credentials;
///
/// let creds = Credentials::new("alice@example.org", "hunter2");
/// assert_eq!(creds.username(), "alice@example.org");
/// ```
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The JSON body sent to the login endpoint.
    pub fn login_body(&self) -> LoginRequest<'_> {
        LoginRequest {
            email: &self.username,
            password: &self.password,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Request body for `POST /login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}
