//! Backend for trying the proxy by hand.
//!
//! ```text
//! cargo run --example mock_backend
//! cargo run -- --backend-url http://127.0.0.1:9000
//! curl -u bubbles:bubbles http://127.0.0.1:8080/status
//! ```

use axum::{http::HeaderMap, routing::get, Router};
use std::net::SocketAddr;

async fn whoami(headers: HeaderMap) -> String {
    let user = headers
        .get("x-http-user")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("nobody");
    format!("Hello, {}!\n", user)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = Router::new()
        .route("/", get(whoami))
        .route("/status", get(whoami))
        .route("/health", get(|| async { "Backend is healthy!\n" }));

    let addr = SocketAddr::from(([127, 0, 0, 1], 9000));
    println!("Mock backend listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
