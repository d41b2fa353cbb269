//! Integration tests for the worker HTTP pipeline.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn hello_route_returns_json() {
    let addr = common::start_server().await;
    let client = common::client();

    let res = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Hello World!" }));
}

#[tokio::test]
async fn security_headers_on_every_response() {
    let addr = common::start_server().await;
    let client = common::client();

    let res = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap();
    let headers = res.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["referrer-policy"], "no-referrer");
    assert!(headers.contains_key("strict-transport-security"));
}

#[tokio::test]
async fn api_data_is_byte_identical_within_ttl() {
    let addr = common::start_server().await;
    let client = common::client();
    let url = format!("http://{addr}/api/data");

    let first = client.get(&url).send().await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first_body = first.bytes().await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    let second = client.get(&url).send().await.unwrap();
    let second_body = second.bytes().await.unwrap();
    assert_eq!(first_body, second_body, "cached response must not change");

    let parsed: Value = serde_json::from_slice(&first_body).unwrap();
    assert!(parsed["timestamp"].is_u64());
    assert!(parsed["message"].is_string());
}

#[tokio::test]
async fn api_data_caches_per_path_and_query() {
    let addr = common::start_server().await;
    let client = common::client();

    let plain = client
        .get(format!("http://{addr}/api/data"))
        .send()
        .await
        .unwrap();
    let plain_body = plain.bytes().await.unwrap();

    // Different timestamp for a different key.
    tokio::time::sleep(Duration::from_millis(5)).await;

    let with_query = client
        .get(format!("http://{addr}/api/data?user=1"))
        .send()
        .await
        .unwrap();
    let query_body = with_query.bytes().await.unwrap();
    assert_ne!(plain_body, query_body, "distinct keys cache independently");
}

#[tokio::test]
async fn oversized_body_is_rejected_before_handlers() {
    let addr = common::start_server().await;
    let client = common::client();

    let oversized = vec![b'x'; 20 * 1024];
    let res = client
        .post(format!("http://{addr}/api/data"))
        .header("content-type", "application/json")
        .body(oversized)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn rate_limit_rejects_the_101st_request() {
    let addr = common::start_server().await;
    let client = common::client();
    let url = format!("http://{addr}/");

    for i in 0..100 {
        let res = client.get(&url).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "request {i} should pass");
    }

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn gzip_is_negotiated_when_requested() {
    let addr = common::start_server().await;
    let client = common::client();

    let res = client
        .get(format!("http://{addr}/api/data"))
        .header("accept-encoding", "gzip")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-encoding"], "gzip");
}
