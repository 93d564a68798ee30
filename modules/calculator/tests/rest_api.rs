#![allow(clippy::unwrap_used, clippy::expect_used)]

//! REST surface of the calculator module, mounted the way the server mounts it.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use calculator::{CalculatorConfig, CalculatorModule};
use serde_json::Value;
use tower::ServiceExt;

const ROUTE: &str = "/api/v1/calculate";

fn app() -> Router {
    CalculatorModule::new(CalculatorConfig::default()).register_rest(Router::new())
}

async fn send(app: Router, method: &str, uri: &str, body: impl Into<Body>) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn calculate(expression: &str) -> (StatusCode, Value) {
    let body = serde_json::json!({ "expression": expression }).to_string();
    let (status, bytes) = send(app(), "POST", ROUTE, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn evaluates_expressions() {
    let cases = [
        ("2+2*2", "6.000000"),
        ("(2+2)*2", "8.000000"),
        ("1 + 2 * (3 + 4) / 2 - 1", "7.000000"),
        ("10/4", "2.500000"),
        ("1/3", "0.333333"),
        ("2-5", "-3.000000"),
        ("007", "7.000000"),
    ];
    for (expression, expected) in cases {
        let (status, json) = calculate(expression).await;
        assert_eq!(status, StatusCode::OK, "{expression}");
        assert_eq!(json, serde_json::json!({ "result": expected }), "{expression}");
    }
}

#[tokio::test]
async fn invalid_expressions_are_unprocessable() {
    for expression in ["", "2+", "(1+2", "1+2)", "2a", "-1", "()"] {
        let (status, json) = calculate(expression).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "input {expression}");
        assert_eq!(
            json,
            serde_json::json!({ "error": "Expression is not valid" }),
            "input {expression}"
        );
    }
}

#[tokio::test]
async fn division_by_zero_is_a_server_error() {
    let (status, json) = calculate("4/(2-2)").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({ "error": "Server Error" }));
}

#[tokio::test]
async fn oversized_numerals_are_unprocessable() {
    let huge = "9".repeat(400);
    for expression in [huge.clone(), format!("{huge}-{huge}")] {
        let (status, json) = calculate(&expression).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json, serde_json::json!({ "error": "Expression is not valid" }));
    }
}

#[tokio::test]
async fn overflowing_result_is_a_server_error() {
    let big = "9".repeat(300);
    let (status, json) = calculate(&format!("{big}*{big}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({ "error": "Server Error" }));
}

#[tokio::test]
async fn malformed_bodies_are_unprocessable() {
    for body in [
        "not json",
        r#"{"expression": 5}"#,
        r#"{"expression": "1", "extra": true}"#,
    ] {
        let (status, bytes) = send(app(), "POST", ROUTE, body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid request format" }));
    }
}

#[tokio::test]
async fn missing_expression_is_not_valid() {
    for body in ["{}", r#"{"expression": null}"#] {
        let (status, bytes) = send(app(), "POST", ROUTE, body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Expression is not valid" }));
    }
}

#[tokio::test]
async fn only_post_is_accepted() {
    for method in ["GET", "PUT", "DELETE", "PATCH"] {
        let (status, bytes) = send(app(), method, ROUTE, Body::empty()).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(bytes, b"Method not accepted");
    }
}

#[tokio::test]
async fn configured_route_is_used() {
    let module = CalculatorModule::new(CalculatorConfig {
        route: "/calc".to_owned(),
    });
    let app = module.register_rest(Router::new());

    let (status, bytes) = send(app.clone(), "POST", "/calc", r#"{"expression":"3*3"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, br#"{"result":"9.000000"}"#);

    let (status, _) = send(app, "POST", ROUTE, r#"{"expression":"3*3"}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
