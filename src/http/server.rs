//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with all routes
//! - Wire up middleware (tracing, panic containment, security headers,
//!   compression, rate limiting, body limits)
//! - Serve on a caller-provided listener with graceful shutdown
//!
//! One `HttpServer` per worker process; its cache and rate-limit state are
//! private to that worker.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer,
};

use crate::cache::ExpiringCache;
use crate::clock::Clock;
use crate::security::rate_limit::{self, RateLimiter};
use crate::security::{headers, limits};

use super::error;
use super::handlers::{self, CachedData};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ExpiringCache<CachedData>>,
}

/// HTTP server for one worker process.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let state = AppState {
            cache: Arc::new(ExpiringCache::new(clock.clone())),
        };
        let limiter = Arc::new(RateLimiter::new(
            rate_limit::MAX_REQUESTS_PER_WINDOW,
            rate_limit::WINDOW,
            clock,
        ));
        Self {
            router: Self::build_router(state, limiter),
        }
    }

    /// Build the Axum router with all middleware layers. Later layers are
    /// outermost: tracing wraps everything, the body limit sits closest to
    /// the routes.
    fn build_router(state: AppState, limiter: Arc<RateLimiter>) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/cpu-intensive", get(handlers::cpu_intensive))
            .route("/api/data", get(handlers::api_data))
            .with_state(state)
            .layer(limits::body_limit_layer())
            .layer(middleware::from_fn_with_state(
                limiter,
                rate_limit::rate_limit_middleware,
            ))
            .layer(CompressionLayer::new())
            .layer(middleware::from_fn(headers::security_headers))
            .layer(CatchPanicLayer::custom(error::handle_panic))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            pid = std::process::id(),
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
