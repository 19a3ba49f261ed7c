//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the gate + forwarding delegate from validated config
//! - Create Axum Router routing every method and path to the gate
//! - Wire up middleware (request ID, access log)
//! - Serve HTTP/1.1 and HTTP/2 with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::auth::{AuthGate, AuthPolicy};
use crate::config::ProxyConfig;
use crate::error::StartupError;
use crate::http::forward::ForwardingDelegate;
use crate::http::handler::Handler;
use crate::http::origin::BackendOrigin;
use crate::observability::access_log;

/// HTTP server for the authenticating proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
    origin: BackendOrigin,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the backend URL cannot be used as an origin.
    pub fn new(config: ProxyConfig) -> Result<Self, StartupError> {
        tracing::info!("Setting up handlers");

        let origin = BackendOrigin::parse(&config.backend.url)?;
        let delegate = ForwardingDelegate::new(origin.clone(), &config.backend);
        let gate = AuthGate::new(AuthPolicy::from_config(&config.auth), delegate);

        Ok(Self {
            router: build_router(gate),
            config: Arc::new(config),
            origin,
        })
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            backend = %self.origin,
            address = %addr,
            "Starting reverse proxy server"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    pub fn origin(&self) -> &BackendOrigin {
        &self.origin
    }
}

/// Route every method and path to `handler`, wrapped in the access log.
///
/// The request id is set on the way in only. Responses leave exactly as the
/// handler produced them.
pub fn build_router<H: Handler + 'static>(handler: H) -> Router {
    let state = Arc::new(handler);

    Router::new()
        .route("/", any(proxy_handler::<H>))
        .route("/{*path}", any(proxy_handler::<H>))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(access_log::make_request_span)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(LatencyUnit::Millis),
                        ),
                ),
        )
}

async fn proxy_handler<H: Handler>(
    State(handler): State<Arc<H>>,
    request: Request<Body>,
) -> Response {
    handler.handle(request).await
}
