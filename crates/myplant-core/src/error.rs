//! Error types for the MyPlant client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, request and input validation failures, plus the
//! storage and credential-parsing errors that stay internal to the store.

use thiserror::Error;

/// The unified error type for MyPlant operations.
///
/// Every public client method surfaces one of these variants directly; there
/// is no retry or silent recovery.
#[derive(Debug, Error)]
pub enum Error {
    /// The server rejected a login attempt.
    #[error("authentication failed (HTTP {status}): {body}")]
    Authentication { status: u16, body: String },

    /// No credential is stored and the request requires one.
    #[error("not authenticated, please login first")]
    NotAuthenticated,

    /// An authenticated request returned a non-success status.
    #[error("request failed: {status}, {body}")]
    Request { status: u16, body: String },

    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response body could not be decoded into the expected shape.
    #[error("invalid response: {message}")]
    Decode { message: String },

    /// Input validation errors (base URL, header values).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication { status, .. } | Error::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a [`Error::Decode`] from a message.
    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::decode(err.to_string())
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::decode(err.to_string())
        } else {
            Error::Transport(TransportError::from(err))
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// A value cannot be carried in an HTTP header.
    #[error("invalid header value for {header}")]
    HeaderValue { header: &'static str },
}

/// A stored or received cookie that does not contain a usable credential.
///
/// The store logs this and treats the credential as absent; it is never
/// returned from a public client method.
#[derive(Debug, Error)]
#[error("malformed credential: {reason}")]
pub struct MalformedCredentialError {
    pub reason: String,
}

impl MalformedCredentialError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors raised by a storage backend.
///
/// These never leave the credential store; a failing tier is skipped.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be used in this environment.
    #[error("{backend} unavailable: {reason}")]
    Unavailable {
        backend: &'static str,
        reason: String,
    },

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// OS keyring failure.
    #[error("keyring error: {message}")]
    Keyring { message: String },
}
