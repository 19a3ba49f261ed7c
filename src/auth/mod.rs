//! Authorization subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → credentials.rs (decode Authorization: Basic ...)
//!     → policy.rs (exact match or wildcard → Outcome)
//!     → gate.rs (reject with 401, or stamp X-HTTP-USER and forward)
//! ```
//!
//! # Design Decisions
//! - Policy is built once from config and never mutated
//! - Every decision happens exactly once per request, no retries
//! - The configured password never appears in logs or responses

pub mod credentials;
pub mod gate;
pub mod policy;

pub use credentials::{BasicCredentials, CredentialsError};
pub use gate::{Admitted, AuthGate, IDENTITY_HEADER};
pub use policy::{AuthPolicy, Outcome};
