//! Handler fault containment.
//!
//! Every per-request fault, whether an `Err` from a handler or a panic
//! escaping one, is logged with full detail server-side and rendered to
//! the client as the same generic 500 body. Nothing internal leaks.

use std::any::Any;

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

const GENERIC_ERROR: &str = "Something broke!";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("system time is before the unix epoch: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "handler failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": GENERIC_ERROR })),
        )
            .into_response()
    }
}

/// Panic handler for `CatchPanicLayer`: same generic body as [`AppError`].
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };
    tracing::error!(panic = detail, "handler panicked");

    let body = json!({ "error": GENERIC_ERROR }).to_string();
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}
