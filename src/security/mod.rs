//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (per-IP window check, 429 on excess)
//!     → limits.rs (request body size cap, 413 on excess)
//!     → Pass to routes
//!
//! Outgoing response:
//!     → headers.rs (hardening headers on every response)
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any check failure
//! - Rejections are client errors, logged at warn, never 5xx

pub mod headers;
pub mod limits;
pub mod rate_limit;

pub use rate_limit::RateLimiter;
