//! Endpoint paths and request/response types.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use myplant_core::{Credential, User};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// `POST /login`, the only path that may be called without a credential.
pub const LOGIN: &str = "/login";

/// Whether `path` names the login endpoint, with or without a leading slash.
pub fn is_login(path: &str) -> bool {
    path.trim_start_matches('/') == LOGIN.trim_start_matches('/')
}

/// `GET /activities`
pub const ACTIVITIES: &str = "/activities";

/// `GET /wudjes`, `POST /wudjes`
pub const WUDJES: &str = "/wudjes";

/// `GET|POST|DELETE /activities/{id}`
pub fn activity(id: &str) -> String {
    format!("{}/{}", ACTIVITIES, id)
}

// ============================================================================
// Response Envelope Fields
// ============================================================================

/// Field holding the list in `GET /activities`.
pub(crate) const ACTIVITIES_FIELD: &str = "data";

/// Field holding the activity in `GET /activities/{id}`.
pub(crate) const ACTIVITY_FIELD: &str = "activity";

/// Field holding the list in `GET /wudjes`.
pub(crate) const WUDJES_FIELD: &str = "items";

// ============================================================================
// Login
// ============================================================================

/// Decoded body of a successful login.
///
/// The server's fields are kept as sent; anything beyond the known ones is
/// available in `extra`.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LoginData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LoginData {
    /// The `user` field as a profile, if present and well-formed.
    pub fn profile(&self) -> Option<User> {
        let user = self.user.as_ref()?;
        match serde_json::from_value(user.clone()) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "Login response user does not match the profile shape");
                None
            }
        }
    }
}

// Hide the server token in Debug output
impl fmt::Debug for LoginData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginData")
            .field("success", &self.success)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Result of [`MyPlantClient::login`](crate::MyPlantClient::login).
#[derive(Clone)]
pub struct LoginResponse {
    /// The decoded response body.
    pub data: LoginData,
    /// The session this response carried, if any. `None` means nothing was
    /// stored and any earlier session is left untouched.
    pub credential: Option<Credential>,
    /// The raw `Set-Cookie` value carrying the session, or the first
    /// `Set-Cookie` header when none carried it.
    ///
    /// # Security
    ///
    /// Contains the session token. Never log or display it.
    pub header: Option<String>,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("data", &self.data)
            .field("credential", &self.credential)
            .field("header", &self.header.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
