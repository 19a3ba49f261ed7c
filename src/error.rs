//! Error types surfaced to callers and to `main`.
//!
//! Gate rejections and forwarding failures render themselves as HTTP
//! responses. Startup errors are the only fatal ones.

use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::config::ConfigError;
use crate::http::origin::OriginError;

/// Why the gate refused to forward a request.
///
/// The display text is the exact response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Unable to extract basic auth credentials")]
    MissingCredentials,

    #[error("Missing username")]
    EmptyUsername,

    #[error("Incorrect auth credentials")]
    CredentialMismatch,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Failure to obtain a response from the backend.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("could not build backend request target: {0}")]
    Target(#[from] axum::http::Error),

    #[error("backend unreachable: {0}")]
    Unreachable(#[source] hyper_util::client::legacy::Error),

    #[error("backend did not respond within {0:?}")]
    Timeout(Duration),
}

impl ForwardError {
    pub fn status(&self) -> StatusCode {
        match self {
            ForwardError::Target(_) | ForwardError::Unreachable(_) => StatusCode::BAD_GATEWAY,
            ForwardError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::Target(_) => "target",
            ForwardError::Unreachable(_) => "unreachable",
            ForwardError::Timeout(_) => "timeout",
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let body = match self {
            ForwardError::Timeout(_) => "Upstream request timed out",
            _ => "Upstream request failed",
        };
        (self.status(), body).into_response()
    }
}

/// Conditions that stop the process before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid backend URL: {0}")]
    Origin(#[from] OriginError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
