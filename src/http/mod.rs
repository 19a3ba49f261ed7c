//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, access log)
//!     → auth::AuthGate (credentials, policy, identity header)
//!     → forward.rs (origin.rs rewrite, headers.rs cleanup, pooled client)
//!     → backend response streamed to client
//! ```

pub mod forward;
pub mod handler;
pub mod headers;
pub mod origin;
pub mod server;

pub use forward::ForwardingDelegate;
pub use handler::Handler;
pub use origin::{BackendOrigin, OriginError};
pub use server::{build_router, HttpServer};
