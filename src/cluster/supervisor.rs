//! Worker pool supervision and respawn.

use std::collections::HashMap;
use std::process::ExitStatus;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::error::ServerError;

use super::spawner::SpawnWorker;

/// A worker that lived shorter than this before exiting counts as a fast
/// exit for the crash-loop guard.
const FAST_EXIT_THRESHOLD: Duration = Duration::from_secs(1);
const RESPAWN_BASE_DELAY: Duration = Duration::from_millis(100);
const RESPAWN_MAX_DELAY: Duration = Duration::from_secs(5);

/// Notification that a tracked worker terminated. `status` is `None` when
/// waiting on the child itself failed.
#[derive(Debug)]
pub struct WorkerExit {
    pub pid: u32,
    pub status: Option<ExitStatus>,
}

struct WorkerRecord {
    spawned_at: Instant,
}

/// Keeps a fixed-size pool of worker processes alive.
///
/// Each spawned child is awaited by its own task, which forwards the exit
/// onto a queue. The supervisor consumes that queue one notification at a
/// time, so worker-set mutation is strictly sequential.
pub struct Supervisor {
    spawner: Box<dyn SpawnWorker>,
    target: usize,
    workers: HashMap<u32, WorkerRecord>,
    exit_tx: mpsc::UnboundedSender<WorkerExit>,
    exits: mpsc::UnboundedReceiver<WorkerExit>,
    consecutive_fast_exits: u32,
}

impl Supervisor {
    pub fn new(spawner: Box<dyn SpawnWorker>, target: usize) -> Self {
        let (exit_tx, exits) = mpsc::unbounded_channel();
        Self {
            spawner,
            target: target.max(1),
            workers: HashMap::new(),
            exit_tx,
            exits,
            consecutive_fast_exits: 0,
        }
    }

    /// Spawn the initial worker pool. Any failure here is fatal.
    pub fn start(&mut self) -> Result<(), ServerError> {
        tracing::info!(
            pid = std::process::id(),
            workers = self.target,
            "supervisor running"
        );
        for _ in 0..self.target {
            let pid = self.spawn_worker().map_err(ServerError::SpawnWorker)?;
            tracing::info!(pid, "worker started");
        }
        Ok(())
    }

    /// Consume exit notifications until shutdown is requested.
    pub async fn run(&mut self) {
        loop {
            tokio::select! {
                alive = self.process_next_exit() => {
                    if !alive {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown signal received, stopping worker pool");
                    break;
                }
            }
        }
    }

    /// Handle a single exit notification: log the death, drop the record,
    /// spawn one replacement. Returns false once the queue has closed.
    pub async fn process_next_exit(&mut self) -> bool {
        let Some(exit) = self.exits.recv().await else {
            return false;
        };
        self.handle_exit(exit).await;
        true
    }

    /// Workers currently tracked by the pool.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    async fn handle_exit(&mut self, exit: WorkerExit) {
        let record = self.workers.remove(&exit.pid);
        tracing::warn!(pid = exit.pid, status = ?exit.status, "worker died");

        let fast_exit = record
            .map(|r| r.spawned_at.elapsed() < FAST_EXIT_THRESHOLD)
            .unwrap_or(false);
        if fast_exit {
            self.consecutive_fast_exits += 1;
            let delay = respawn_delay(self.consecutive_fast_exits);
            tracing::warn!(
                fast_exits = self.consecutive_fast_exits,
                delay_ms = delay.as_millis() as u64,
                "worker exited shortly after spawn, delaying respawn"
            );
            tokio::time::sleep(delay).await;
        } else {
            self.consecutive_fast_exits = 0;
        }

        // A failed respawn must not take the supervisor down with it.
        match self.spawn_worker() {
            Ok(pid) => tracing::info!(pid, "worker respawned"),
            Err(e) => tracing::error!(error = %e, "failed to respawn worker"),
        }
    }

    fn spawn_worker(&mut self) -> std::io::Result<u32> {
        let mut child = self.spawner.spawn()?;
        let pid = child.id().unwrap_or_default();
        self.workers.insert(
            pid,
            WorkerRecord {
                spawned_at: Instant::now(),
            },
        );

        let tx = self.exit_tx.clone();
        tokio::spawn(async move {
            let status = match child.wait().await {
                Ok(status) => Some(status),
                Err(e) => {
                    tracing::error!(pid, error = %e, "failed waiting on worker");
                    None
                }
            };
            let _ = tx.send(WorkerExit { pid, status });
        });

        Ok(pid)
    }
}

fn respawn_delay(consecutive_fast_exits: u32) -> Duration {
    let shift = consecutive_fast_exits.saturating_sub(1).min(6);
    (RESPAWN_BASE_DELAY * (1u32 << shift)).min(RESPAWN_MAX_DELAY)
}
