use std::net::SocketAddr;
use std::sync::Arc;

use prefork_server::clock::SystemClock;
use prefork_server::cluster::{self, ProcessSpawner, Supervisor};
use prefork_server::config::{RunMode, ServerConfig};
use prefork_server::error::ServerError;
use prefork_server::http::HttpServer;
use prefork_server::{net, observability};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::init();

    let config = ServerConfig::from_env()?;

    // A spawned worker serves directly, regardless of mode.
    if cluster::is_worker() {
        serve(&config).await?;
        return Ok(());
    }

    match config.mode {
        RunMode::Profile => {
            tracing::info!("running in profiling mode (single process)");
            serve(&config).await?;
        }
        RunMode::Cluster => {
            let spawner = ProcessSpawner::from_current_exe(config.port)?;
            let mut supervisor = Supervisor::new(Box::new(spawner), config.workers);
            supervisor.start()?;
            supervisor.run().await;
        }
    }

    Ok(())
}

async fn serve(config: &ServerConfig) -> Result<(), ServerError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = net::bind_reuseport(addr).map_err(ServerError::Bind)?;
    tracing::info!(
        port = config.port,
        pid = std::process::id(),
        "server started"
    );
    HttpServer::new(Arc::new(SystemClock)).run(listener).await?;
    Ok(())
}
