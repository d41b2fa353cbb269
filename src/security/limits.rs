//! Request size limits.
//!
//! Bodies over the cap are rejected with 413 before any handler runs;
//! a declared `Content-Length` over the cap is rejected without reading
//! the body at all.

use tower_http::limit::RequestBodyLimitLayer;

/// Maximum accepted request body, matching the JSON body parser cap.
pub const MAX_BODY_BYTES: usize = 10 * 1024;

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}
