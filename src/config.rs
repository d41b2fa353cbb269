//! Server configuration, read from the environment.
//!
//! Surface:
//! - `PORT`: listen port, default 3000
//! - `NODE_ENV=profile`: run single-process for profiling; any other value
//!   (including unset) selects cluster mode
//!
//! Parsing is factored over plain values so tests never mutate the
//! process-global environment.

use std::env;
use std::num::NonZeroUsize;
use std::thread;

use crate::error::ServerError;

pub const DEFAULT_PORT: u16 = 3000;

/// Which process topology to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Fork a worker pool and keep it at full strength.
    Cluster,
    /// Single process, no forking. For profiling and diagnostics.
    Profile,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port shared by every worker's listener.
    pub port: u16,

    /// Process topology, selected once at startup.
    pub mode: RunMode,

    /// Worker pool size in cluster mode (one per core, minimum 1).
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            mode: RunMode::Cluster,
            workers: worker_count(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ServerError> {
        let port = env::var("PORT").ok();
        let node_env = env::var("NODE_ENV").ok();
        Self::from_vars(port.as_deref(), node_env.as_deref())
    }

    /// Build configuration from already-extracted variable values.
    pub fn from_vars(port: Option<&str>, node_env: Option<&str>) -> Result<Self, ServerError> {
        let port = match port {
            Some(raw) if !raw.trim().is_empty() => {
                raw.trim()
                    .parse()
                    .map_err(|source| ServerError::InvalidPort {
                        value: raw.to_string(),
                        source,
                    })?
            }
            _ => DEFAULT_PORT,
        };

        let mode = match node_env {
            Some("profile") => RunMode::Profile,
            _ => RunMode::Cluster,
        };

        Ok(Self {
            port,
            mode,
            workers: worker_count(),
        })
    }
}

/// Available cores at startup, floor of 1.
fn worker_count() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
