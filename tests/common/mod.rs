#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use run_command_service::server::SECRET_HEADER;

pub use run_command_service_test_utils::builders::TEST_SECRET;

/// Send one request through the router and return status + raw body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    secret: Option<&str>,
) -> (StatusCode, Vec<u8>) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(secret) = secret {
        req = req.header(SECRET_HEADER, secret);
    }

    let resp = app
        .clone()
        .oneshot(req.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

/// `POST /execute` with the test secret, body decoded as JSON.
pub async fn execute(app: &Router) -> (StatusCode, Value) {
    let (status, body) = send(app, Method::POST, "/execute", Some(TEST_SECRET)).await;
    let json = serde_json::from_slice(&body)
        .unwrap_or_else(|e| panic!("non-JSON body ({e}): {}", String::from_utf8_lossy(&body)));
    (status, json)
}
