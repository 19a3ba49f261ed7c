//! auth-proxy: HTTP Basic auth in front of a single backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  AUTH PROXY                  │
//!                      │                                              │
//!   Client Request     │  ┌──────────┐   ┌───────────┐   ┌─────────┐  │
//!   ───────────────────┼─▶│access log│──▶│ auth gate │──▶│ forward │──┼──▶ Backend
//!                      │  │request id│   │           │   │delegate │  │
//!                      │  └──────────┘   └─────┬─────┘   └────┬────┘  │
//!   Client Response    │                       │ 401          │       │
//!   ◀──────────────────┼───────────────────────┴──────────────┘       │
//!                      │                                              │
//!                      │  config (file + flags) · lifecycle · metrics │
//!                      └──────────────────────────────────────────────┘
//! ```

use clap::Parser;

use auth_proxy::config::Cli;
use auth_proxy::lifecycle::startup;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().load()?;
    startup::run(config).await?;
    Ok(())
}
