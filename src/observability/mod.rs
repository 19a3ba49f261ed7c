//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request:
//!     → access_log.rs (span + status/latency event via TraceLayer)
//! Gate and delegate:
//!     → tracing events (setup, decisions, upstream errors)
//!     → metrics.rs (decision and upstream counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON, logging.rs)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Nothing here feeds back into authorization decisions
//! - Request ID flows from the access log span to the backend
//! - Passwords are never recorded

pub mod access_log;
pub mod logging;
pub mod metrics;
