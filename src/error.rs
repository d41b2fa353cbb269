//! Startup fault taxonomy.
//!
//! Only faults that occur before the server is serving traffic live here;
//! they are fatal and abort the process with a non-zero status. Per-request
//! faults are handled inside the HTTP pipeline (`http::error`) and never
//! reach this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("failed to spawn worker process: {0}")]
    SpawnWorker(#[source] std::io::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
