//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use prefork_server::clock::SystemClock;
use prefork_server::http::HttpServer;

/// Start a full server instance on an ephemeral port. Each call gets its
/// own cache and rate-limit state.
pub async fn start_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(Arc::new(SystemClock));
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
