//! Basic credential extraction from the `Authorization` header.

use std::fmt;

use axum::http::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

const BASIC_PREFIX: &str = "Basic ";

/// Why no usable credential pair could be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("no Authorization header")]
    Absent,

    #[error("Authorization header is not visible ASCII")]
    NotText,

    #[error("Authorization scheme is not Basic")]
    NotBasic,

    #[error("credentials are not valid base64")]
    InvalidBase64,

    #[error("credentials are not valid UTF-8")]
    InvalidUtf8,

    #[error("credentials have no ':' separator")]
    MissingSeparator,

    #[error("username cannot be carried in a header value")]
    UnrepresentableUsername,
}

/// A decoded `username:password` pair.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read the credentials from a request's `Authorization` header.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, CredentialsError> {
        let value = headers.get(AUTHORIZATION).ok_or(CredentialsError::Absent)?;
        Self::parse(value)
    }

    /// Decode a `Basic <base64(user:pass)>` header value.
    ///
    /// The scheme is matched case-insensitively. The username ends at the
    /// first `:`, so passwords may themselves contain colons.
    pub fn parse(value: &HeaderValue) -> Result<Self, CredentialsError> {
        let text = value.to_str().map_err(|_| CredentialsError::NotText)?;
        let encoded = strip_basic_prefix(text).ok_or(CredentialsError::NotBasic)?;

        let decoded = STANDARD
            .decode(encoded)
            .map_err(|_| CredentialsError::InvalidBase64)?;
        let decoded = String::from_utf8(decoded).map_err(|_| CredentialsError::InvalidUtf8)?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or(CredentialsError::MissingSeparator)?;
        Ok(Self::new(username, password))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// The username as a header value for the backend.
    ///
    /// Decoded usernames may hold bytes a header cannot carry, such as
    /// control characters. Only authorized requests need this.
    pub fn identity(&self) -> Result<HeaderValue, CredentialsError> {
        HeaderValue::from_str(&self.username).map_err(|_| CredentialsError::UnrepresentableUsername)
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn strip_basic_prefix(text: &str) -> Option<&str> {
    let scheme = text.get(..BASIC_PREFIX.len())?;
    if scheme.eq_ignore_ascii_case(BASIC_PREFIX) {
        text.get(BASIC_PREFIX.len()..)
    } else {
        None
    }
}
