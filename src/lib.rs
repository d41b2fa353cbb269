//! Pre-forking clustered HTTP server.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────┐
//!                  │                   SUPERVISOR                      │
//!                  │                                                   │
//!                  │   spawn N workers ──▶ await exits ──▶ respawn     │
//!                  └───────┬──────────────────┬───────────────┬───────┘
//!                          │                  │               │
//!                          ▼                  ▼               ▼
//!                  ┌───────────┐      ┌───────────┐   ┌───────────┐
//!                  │ worker 1  │      │ worker 2  │   │ worker N  │
//!                  └─────┬─────┘      └─────┬─────┘   └─────┬─────┘
//!                        │                  │               │
//!                        └───── SO_REUSEPORT listeners ─────┘
//!                                  (kernel distributes
//!                                   connections per port)
//!
//!     Per worker:
//!     request ──▶ trace ──▶ panic containment ──▶ security headers
//!             ──▶ compression ──▶ rate limit ──▶ body limit
//!             ──▶ routes (/, /cpu-intensive, /api/data + expiring cache)
//! ```
//!
//! Each worker is a full, independent copy of the HTTP pipeline. The only
//! cross-process coordination is the supervisor's respawn loop; caches and
//! rate-limit windows are private to their worker.

// Core subsystems
pub mod cache;
pub mod clock;
pub mod cluster;
pub mod config;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod error;
pub mod observability;
pub mod security;

pub use cluster::Supervisor;
pub use config::{RunMode, ServerConfig};
pub use error::ServerError;
pub use http::HttpServer;
