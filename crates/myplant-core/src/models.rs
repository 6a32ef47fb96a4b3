//! Resource types exchanged with the MyPlant API.
//!
//! Dates are kept as the strings the server sends; the client never
//! interprets them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A member profile, as returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub is_admin: bool,
    pub registration_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

/// An activity members can sign up for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub datetime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    pub committee: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub total_sign_ups: u32,
    pub user_status: UserStatus,
}

/// The current user's registration state for an activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    pub signed_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signup_id: Option<String>,
    pub on_waitlist: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waitlist_id: Option<String>,
}

/// How to register for an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupKind {
    Signup,
    Waitlist,
}

/// Body for `POST /activities/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySignup {
    #[serde(rename = "type")]
    pub kind: SignupKind,
    /// Answers keyed by question id.
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

impl ActivitySignup {
    pub fn signup() -> Self {
        Self {
            kind: SignupKind::Signup,
            answers: BTreeMap::new(),
        }
    }

    pub fn waitlist() -> Self {
        Self {
            kind: SignupKind::Waitlist,
            answers: BTreeMap::new(),
        }
    }

    pub fn with_answer(mut self, question: impl Into<String>, answer: impl Into<String>) -> Self {
        self.answers.insert(question.into(), answer.into());
        self
    }
}

/// Body for `DELETE /activities/{id}`; the path id is taken from `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveRegistration {
    #[serde(rename = "type")]
    kind: SignoutKind,
    pub id: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SignoutKind {
    #[default]
    Signout,
}

impl RemoveRegistration {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            kind: SignoutKind::Signout,
            id: id.into(),
        }
    }
}

/// A short message on the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wud {
    pub id: String,
    pub message: String,
    pub created: String,
    pub author: WudAuthor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WudAuthor {
    pub id: String,
    pub name: String,
    pub username: String,
}

/// Body for `POST /wudjes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWudjeRequest {
    pub message: String,
}

impl PostWudjeRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
