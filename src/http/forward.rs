//! Single-backend forwarding.
//!
//! # Responsibilities
//! - Rewrite the request target onto the backend origin
//! - Strip hop-by-hop headers and append X-Forwarded-For
//! - Send over a pooled client and stream the response back unbuffered
//! - Map transport failures to 502 / 504
//!
//! # Design Decisions
//! - No retries; a failed round-trip is surfaced once
//! - The timeout covers connect + response headers, not body streaming
//! - Dropping the response body (caller went away) drops the upstream body

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, Version};
use axum::response::{IntoResponse, Response};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::BackendConfig;
use crate::error::ForwardError;
use crate::http::handler::Handler;
use crate::http::headers::{append_forwarded_for, strip_hop_by_hop};
use crate::http::origin::BackendOrigin;
use crate::observability::metrics;

/// Forwards every request it receives to one fixed backend.
#[derive(Debug, Clone)]
pub struct ForwardingDelegate {
    origin: BackendOrigin,
    client: Client<HttpConnector, Body>,
    request_timeout: Duration,
}

impl ForwardingDelegate {
    pub fn new(origin: BackendOrigin, config: &BackendConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));
        connector.set_nodelay(true);

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
            .build(connector);

        tracing::info!(
            backend = %origin,
            connect_timeout_secs = config.connect_timeout_secs,
            request_timeout_secs = config.request_timeout_secs,
            "Forwarding delegate ready"
        );

        Self {
            origin,
            client,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    pub fn origin(&self) -> &BackendOrigin {
        &self.origin
    }

    /// One round-trip to the backend.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, ForwardError> {
        let (mut parts, body) = request.into_parts();

        parts.uri = self.origin.rewrite(&parts.uri)?;
        // The pooled connections speak HTTP/1.1 regardless of how the caller connected.
        parts.version = Version::HTTP_11;

        // Behind the gate this is a no-op; it matters when the delegate serves alone.
        strip_hop_by_hop(&mut parts.headers);
        if let Some(ConnectInfo(peer)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            append_forwarded_for(&mut parts.headers, peer.ip());
        }

        let upstream = Request::from_parts(parts, body);
        let start = Instant::now();

        let response = tokio::time::timeout(self.request_timeout, self.client.request(upstream))
            .await
            .map_err(|_| ForwardError::Timeout(self.request_timeout))?
            .map_err(ForwardError::Unreachable)?;

        metrics::record_upstream(response.status().as_u16(), start);
        Ok(relay(response))
    }
}

/// Hand the backend response to the caller, streaming the body as it arrives.
fn relay(response: hyper::Response<hyper::body::Incoming>) -> Response {
    let (mut parts, body) = response.into_parts();
    strip_hop_by_hop(&mut parts.headers);
    Response::from_parts(parts, Body::new(body))
}

impl Handler for ForwardingDelegate {
    async fn handle(&self, request: Request<Body>) -> Response {
        let method = request.method().clone();
        let path = request.uri().path().to_string();

        match self.forward(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(
                    backend = %self.origin,
                    method = %method,
                    path = %path,
                    error = %err,
                    "Upstream error"
                );
                metrics::record_upstream_failure(err.kind());
                err.into_response()
            }
        }
    }
}
