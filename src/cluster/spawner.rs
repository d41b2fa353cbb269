//! Worker process creation.

use std::path::PathBuf;

use tokio::process::{Child, Command};

use super::WORKER_ENV;

/// How the supervisor creates worker processes. A trait so the respawn
/// loop can be driven with throwaway commands in tests.
pub trait SpawnWorker: Send + Sync {
    fn spawn(&self) -> std::io::Result<Child>;
}

/// Production spawner: re-runs the current executable with the worker
/// marker and the listen port in its environment.
pub struct ProcessSpawner {
    exe: PathBuf,
    port: u16,
}

impl ProcessSpawner {
    pub fn from_current_exe(port: u16) -> std::io::Result<Self> {
        Ok(Self {
            exe: std::env::current_exe()?,
            port,
        })
    }
}

impl SpawnWorker for ProcessSpawner {
    fn spawn(&self) -> std::io::Result<Child> {
        Command::new(&self.exe)
            .env(WORKER_ENV, "1")
            .env("PORT", self.port.to_string())
            .kill_on_drop(true)
            .spawn()
    }
}
