//! SDK error types

use thiserror::Error;

/// Error type for Fieldform API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid API key (401/403). Recoverable by
    /// re-authenticating; never carries the key itself.
    #[error("unauthorized: missing or invalid API key")]
    Unauthorized,

    /// Non-2xx response with whatever message the server supplied.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// 2xx response whose body reports `success: false` on a registry
    /// append.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Transport-level failure. The caller's draft is untouched.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("key store error: {0}")]
    KeyStore(String),
}

impl Error {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }

    /// True for transient transport failures worth retrying as-is.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
