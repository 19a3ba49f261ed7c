//! The authorization gate in front of the forwarding delegate.
//!
//! # Request States
//! ```text
//! Start ──no/malformed header──▶ Rejected(missing)        → 401
//!   │
//!   ▼
//! CredentialsExtracted ──empty user──▶ Rejected(empty)    → 401
//!   │                  ──mismatch───▶ Rejected(mismatch)  → 401
//!   ▼
//! WildcardAuthorized | ExactAuthorized ──username not header-safe──▶ Rejected(missing) → 401
//!   │  strip hop-by-hop, overwrite X-HTTP-USER
//!   ▼
//! Forwarded → upstream response relayed verbatim
//! ```

use axum::body::Body;
use axum::http::header::{HeaderMap, HeaderName, HeaderValue};
use axum::http::Request;
use axum::response::{IntoResponse, Response};

use crate::auth::credentials::BasicCredentials;
use crate::auth::policy::{AuthPolicy, Outcome};
use crate::error::Rejection;
use crate::http::handler::Handler;
use crate::http::headers::strip_hop_by_hop;
use crate::observability::metrics;

/// Header carrying the authenticated username to the backend.
pub const IDENTITY_HEADER: HeaderName = HeaderName::from_static("x-http-user");

/// A request the policy let through, with the identity to stamp.
#[derive(Debug)]
pub struct Admitted {
    pub credentials: BasicCredentials,
    pub identity: HeaderValue,
}

/// Checks Basic credentials and forwards authorized requests to `upstream`.
#[derive(Debug)]
pub struct AuthGate<H> {
    policy: AuthPolicy,
    upstream: H,
}

impl<H: Handler> AuthGate<H> {
    pub fn new(policy: AuthPolicy, upstream: H) -> Self {
        tracing::info!(
            wildcard = policy.is_wildcard(),
            identity_header = %IDENTITY_HEADER,
            "Authorization gate configured"
        );
        Self { policy, upstream }
    }

    pub fn policy(&self) -> &AuthPolicy {
        &self.policy
    }

    /// Run credential extraction and policy for one request.
    ///
    /// Mismatched pairs are judged before the username is turned into a
    /// header value, so in exact mode any wrong pair reads as a mismatch.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Admitted, Rejection> {
        let credentials = match BasicCredentials::from_headers(headers) {
            Ok(credentials) => credentials,
            Err(reason) => {
                tracing::debug!(%reason, "Unable to extract basic auth credentials");
                metrics::record_decision(Outcome::MissingCredentials);
                return Err(Rejection::MissingCredentials);
            }
        };

        let outcome = self.policy.evaluate(&credentials);
        if let Some(rejection) = outcome.rejection() {
            metrics::record_decision(outcome);
            tracing::debug!(
                outcome = %outcome,
                username = credentials.username(),
                "Rejecting request"
            );
            return Err(rejection);
        }

        match credentials.identity() {
            Ok(identity) => {
                metrics::record_decision(outcome);
                Ok(Admitted {
                    credentials,
                    identity,
                })
            }
            Err(reason) => {
                tracing::debug!(
                    %reason,
                    username = credentials.username(),
                    "Unable to extract basic auth credentials"
                );
                metrics::record_decision(Outcome::MissingCredentials);
                Err(Rejection::MissingCredentials)
            }
        }
    }
}

impl<H: Handler> Handler for AuthGate<H> {
    async fn handle(&self, mut request: Request<Body>) -> Response {
        let Admitted {
            credentials,
            identity,
        } = match self.authorize(request.headers()) {
            Ok(admitted) => admitted,
            Err(rejection) => return rejection.into_response(),
        };

        // Stripping first keeps a caller's `Connection: x-http-user` from
        // removing the identity header further down.
        let headers = request.headers_mut();
        strip_hop_by_hop(headers);
        headers.insert(IDENTITY_HEADER, identity);

        tracing::debug!(
            username = credentials.username(),
            method = %request.method(),
            path = request.uri().path(),
            "Letting request through"
        );
        self.upstream.handle(request).await
    }
}
