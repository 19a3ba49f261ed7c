//! Authenticating reverse proxy library.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use auth::{AuthGate, AuthPolicy, IDENTITY_HEADER};
pub use config::schema::ProxyConfig;
pub use http::{ForwardingDelegate, Handler, HttpServer};
pub use lifecycle::Shutdown;
