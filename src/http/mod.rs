//! HTTP pipeline run by every worker.
//!
//! # Data Flow
//! ```text
//! TCP connection (SO_REUSEPORT listener)
//!     → server.rs (Axum setup, middleware stack)
//!     → handlers.rs (routes; /api/data consults the expiring cache)
//!     → error.rs (contains handler faults, renders the generic 500)
//! ```

pub mod error;
pub mod handlers;
pub mod server;

pub use error::AppError;
pub use server::{AppState, HttpServer};
