//! Route handlers.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{extract::State, http::Uri, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::AppError;
use super::server::AppState;

/// How long `/api/data` responses stay valid in the cache.
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

const CACHE_MESSAGE: &str = "This response will be cached for 5 minutes";
const CPU_ITERATIONS: u32 = 10_000_000;

/// Payload served by `/api/data`. Cached whole, so repeat hits within the
/// TTL carry the original timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData {
    pub timestamp: u64,
    pub message: String,
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World!" }))
}

/// Benchmark endpoint. Deliberately burns CPU on the worker's runtime
/// thread; parallelism under load comes from the process pool, not from
/// within one worker.
pub async fn cpu_intensive() -> Json<Value> {
    let mut result = 0.0f64;
    for _ in 0..CPU_ITERATIONS {
        result += fastrand::f64() * fastrand::f64();
    }
    Json(json!({ "result": result }))
}

pub async fn api_data(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<CachedData>, AppError> {
    let key = cache_key(&uri);
    if let Some(data) = state.cache.get(&key) {
        tracing::debug!(key = %key, "cache hit");
        return Ok(Json(data));
    }

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
    let data = CachedData {
        timestamp,
        message: CACHE_MESSAGE.to_string(),
    };
    state.cache.put(key, data.clone(), CACHE_TTL);
    Ok(Json(data))
}

/// Full path plus query string, so distinct queries cache independently.
fn cache_key(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
        .to_string()
}
