//! The session credential carried in the `pb_auth` cookie.
//!
//! The server hands out its session as a `Set-Cookie` header. The credential
//! keeps the cookie value and its expiry; requests replay it as
//! `Cookie: pb_auth=<token>`. Every storage tier persists the credential in
//! its cookie form, so loading goes through the same extraction as a live
//! response.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

use crate::error::MalformedCredentialError;

/// Name of the session cookie.
pub const AUTH_COOKIE: &str = "pb_auth";

static AUTH_COOKIE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bpb_auth=([^;]+)").expect("valid cookie pattern"));

static EXPIRES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bexpires=([^;]+)").expect("valid expires pattern"));

/// Cookie date layouts after the weekday has been stripped. The last two are
/// the legacy Netscape forms (`01-Jan-2030 00:00:00 GMT`).
const COOKIE_DATE_LAYOUTS: [&str; 3] = [
    "%d %b %Y %H:%M:%S GMT",
    "%d-%b-%Y %H:%M:%S GMT",
    "%d-%b-%y %H:%M:%S GMT",
];

/// An authenticated session.
///
/// # Security
///
/// The token is never shown in Debug output. Use [`Credential::token`] only
/// to build request headers or persist the session.
///
/// # Example
///
/// ```
/// use myplant_core::Credential;
///
/// let cred = Credential::from_set_cookie(
///     "pb_auth=ABC123; Path=/; Expires=Wed, 01 Jan 2030 00:00:00 GMT; HttpOnly",
/// )
/// .unwrap();
/// assert_eq!(cred.token(), "ABC123");
/// assert_eq!(cred.cookie_header(), "pb_auth=ABC123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a credential from a token and optional expiry.
    pub fn new(token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Extract a credential from one `Set-Cookie` header value.
    ///
    /// The token is the `pb_auth` cookie value; the expiry comes from the
    /// `Expires` attribute when it parses as an HTTP date.
    ///
    /// # Errors
    ///
    /// Returns an error if the value carries no non-empty `pb_auth` cookie.
    pub fn from_set_cookie(value: &str) -> Result<Self, MalformedCredentialError> {
        let token = AUTH_COOKIE_RE
            .captures(value)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MalformedCredentialError::new("no pb_auth cookie"))?;

        let expires_at = EXPIRES_RE
            .captures(value)
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_cookie_date(m.as_str()));

        Ok(Self::new(token, expires_at))
    }

    /// Find the first credential among several `Set-Cookie` values.
    ///
    /// Returns the credential together with the raw header it came from.
    pub fn from_set_cookies<'a, I>(values: I) -> Option<(Self, &'a str)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        values
            .into_iter()
            .find_map(|raw| Self::from_set_cookie(raw).ok().map(|cred| (cred, raw)))
    }

    /// Returns the session token.
    ///
    /// # Security
    ///
    /// Never log or display this value.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the cookie expiry, if the server sent one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the cookie expiry lies in the past.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the cookie expiry lies before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// The `Cookie` request header value.
    pub fn cookie_header(&self) -> String {
        format!("{}={}", AUTH_COOKIE, self.token)
    }

    /// The persisted form: `pb_auth=<token>; Expires=<date>;`.
    pub fn to_cookie_string(&self) -> String {
        match self.expires_at {
            Some(exp) => format!(
                "{}={}; Expires={};",
                AUTH_COOKIE,
                self.token,
                exp.format("%a, %d %b %Y %H:%M:%S GMT")
            ),
            None => format!("{}={};", AUTH_COOKIE, self.token),
        }
    }
}

impl FromStr for Credential {
    type Err = MalformedCredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_set_cookie(s)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Parse an `Expires` attribute. The weekday is ignored: servers do not
/// always send one that matches the date.
fn parse_cookie_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let date = raw.split_once(',').map_or(raw, |(_, rest)| rest).trim();

    COOKIE_DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(date, layout).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc2822(date)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}
