//! Process supervision subsystem.
//!
//! # Data Flow
//! ```text
//! Supervisor::start()
//!     → spawner.spawn() × target (same executable, PREFORK_WORKER set)
//!     → one waiter task per child forwards (pid, status) to a queue
//!
//! Supervisor::run()
//!     → pull one exit notification at a time
//!     → log death, drop record, spawn one replacement
//! ```
//!
//! # Design Decisions
//! - Exit handling is a single-threaded queue consumer, so no two
//!   respawns ever race for one dead worker
//! - A respawn failure is logged and absorbed; only the initial batch
//!   is allowed to be fatal
//! - Consecutive fast exits delay the next respawn (crash-loop guard)

pub mod spawner;
pub mod supervisor;

pub use spawner::{ProcessSpawner, SpawnWorker};
pub use supervisor::Supervisor;

/// Environment marker distinguishing a spawned worker process from the
/// supervisor, which both run the same executable.
pub const WORKER_ENV: &str = "PREFORK_WORKER";

/// True when the current process was spawned as a worker.
pub fn is_worker() -> bool {
    std::env::var_os(WORKER_ENV).is_some()
}
