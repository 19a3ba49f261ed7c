//! Authorization policy: which credential pairs may pass the gate.
//!
//! # Modes
//! - Exact: username and password must both equal the configured pair
//! - Wildcard: configured username is `"*"`; any non-empty username
//!   passes and the password is not checked
//!
//! The wildcard bypass is deliberate and security-relevant. Do not fold it
//! into exact mode without revisiting every deployment that relies on it.

use std::fmt;

use subtle::ConstantTimeEq;

use crate::auth::credentials::BasicCredentials;
use crate::config::AuthConfig;
use crate::error::Rejection;

/// Per-request authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    MissingCredentials,
    EmptyUsername,
    AuthorizedWildcard,
    AuthorizedMatch,
    DeniedMismatch,
}

impl Outcome {
    pub fn is_authorized(self) -> bool {
        self.rejection().is_none()
    }

    /// The rejection to send, or `None` when the request may be forwarded.
    pub fn rejection(self) -> Option<Rejection> {
        match self {
            Outcome::MissingCredentials => Some(Rejection::MissingCredentials),
            Outcome::EmptyUsername => Some(Rejection::EmptyUsername),
            Outcome::DeniedMismatch => Some(Rejection::CredentialMismatch),
            Outcome::AuthorizedWildcard | Outcome::AuthorizedMatch => None,
        }
    }

    /// Stable label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::MissingCredentials => "missing_credentials",
            Outcome::EmptyUsername => "empty_username",
            Outcome::AuthorizedWildcard => "authorized_wildcard",
            Outcome::AuthorizedMatch => "authorized_match",
            Outcome::DeniedMismatch => "denied_mismatch",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
enum Mode {
    Wildcard,
    Exact { username: String, password: String },
}

/// Immutable policy built once from configuration.
#[derive(Clone)]
pub struct AuthPolicy {
    mode: Mode,
}

impl AuthPolicy {
    pub fn from_config(config: &AuthConfig) -> Self {
        if config.is_wildcard() {
            Self::wildcard()
        } else {
            Self::exact(config.username.clone(), config.password.clone())
        }
    }

    pub fn wildcard() -> Self {
        Self { mode: Mode::Wildcard }
    }

    pub fn exact(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mode: Mode::Exact {
                username: username.into(),
                password: password.into(),
            },
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.mode, Mode::Wildcard)
    }

    /// Decide on an extracted credential pair.
    pub fn evaluate(&self, credentials: &BasicCredentials) -> Outcome {
        if credentials.username().is_empty() {
            return Outcome::EmptyUsername;
        }

        match &self.mode {
            Mode::Wildcard => Outcome::AuthorizedWildcard,
            Mode::Exact { username, password } => {
                // `&` on Choice does not short-circuit.
                let user_ok = credentials.username().as_bytes().ct_eq(username.as_bytes());
                let pass_ok = credentials.password().as_bytes().ct_eq(password.as_bytes());
                if bool::from(user_ok & pass_ok) {
                    Outcome::AuthorizedMatch
                } else {
                    Outcome::DeniedMismatch
                }
            }
        }
    }
}

impl fmt::Debug for AuthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            Mode::Wildcard => f.write_str("AuthPolicy::Wildcard"),
            Mode::Exact { username, .. } => f
                .debug_struct("AuthPolicy::Exact")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}
