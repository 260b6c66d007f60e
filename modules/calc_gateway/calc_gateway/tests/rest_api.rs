#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

//! End-to-end tests of the REST endpoint
//!
//! The module is built from configuration pointing at mock operation services
//! and a mock metrics collector, then driven through the axum router.

use std::time::{Duration, Instant};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use calc_gateway::config::{MetricsConfig, MetricsDelivery, OperationEndpoints};
use calc_gateway::{CalcGateway, CalcGatewayConfig, CalcGatewayError};
use httpmock::prelude::*;
use tower::ServiceExt; // for oneshot

fn config_for(server: &MockServer) -> CalcGatewayConfig {
    CalcGatewayConfig {
        operations: OperationEndpoints::for_base(&server.base_url()),
        operation_timeout_ms: 2000,
        metrics: MetricsConfig {
            enabled: true,
            url: server.url("/measures"),
            timeout_ms: 500,
            delivery: MetricsDelivery::Inline,
        },
    }
}

fn app(config: &CalcGatewayConfig) -> Router {
    CalcGateway::init(config)
        .expect("module init")
        .register_rest(Router::new())
}

async fn post(app: Router, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "text/plain")
        .body(Body::from(body.to_owned()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn evaluates_with_precedence_and_reports_timings() {
    let server = MockServer::start();
    let mul = server.mock(|when, then| {
        when.method(POST).path("/multiplication").body("4 2");
        then.status(200).body("8");
    });
    let sum = server.mock(|when, then| {
        when.method(POST).path("/sum").body("3 8");
        then.status(200).body("11");
    });
    let measures = server.mock(|when, then| {
        when.method(POST)
            .path("/measures")
            .body_includes(r#""expression":"3 + 4 * 2""#)
            .body_includes(r#""totalDurationMs""#);
        then.status(200);
    });

    let (status, body) = post(app(&config_for(&server)), "/", "3 + 4 * 2").await;

    assert_eq!(status, StatusCode::OK);
    let lines: Vec<&str> = body.split("\r\n").collect();
    assert_eq!(lines[0], "result = 11");
    assert_eq!(lines[1], "operations timings:");
    assert!(lines[2].starts_with("Multiplication: 4 * 2 = 8 ("), "{}", lines[2]);
    assert!(lines[2].ends_with(" ms)"));
    assert!(lines[3].starts_with("Sum: 3 + 8 = 11 ("), "{}", lines[3]);
    assert_eq!(lines[4], "");
    assert_eq!(lines.len(), 5);

    mul.assert();
    sum.assert();
    measures.assert();
}

#[tokio::test]
async fn non_commutative_operands_keep_their_order() {
    let server = MockServer::start();
    let sub_first = server.mock(|when, then| {
        when.method(POST).path("/subtraction").body("8 3");
        then.status(200).body("5");
    });
    let sub_second = server.mock(|when, then| {
        when.method(POST).path("/subtraction").body("5 2");
        then.status(200).body("3");
    });
    let _measures = server.mock(|when, then| {
        when.method(POST).path("/measures");
        then.status(200);
    });

    let (status, body) = post(
        app(&config_for(&server)),
        "/calculator-gateway/v1/evaluate",
        "8 - 3 - 2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("result = 3\r\n"), "{body}");
    sub_first.assert();
    sub_second.assert();
}

#[tokio::test]
async fn empty_body_is_an_empty_success_without_calls() {
    let server = MockServer::start();
    let any_call = server.mock(|when, then| {
        when.method(POST);
        then.status(200).body("0");
    });

    let (status, body) = post(app(&config_for(&server)), "/", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "");
    assert_eq!(any_call.calls(), 0, "no operation call and no metrics report");
}

#[tokio::test]
async fn malformed_expression_is_a_client_error() {
    let server = MockServer::start();
    let any_call = server.mock(|when, then| {
        when.method(POST);
        then.status(200).body("0");
    });
    let app = app(&config_for(&server));

    for expression in ["(1 + 2", "1 + 2)", "-5", "3 +", "2 ^ 3", "(1)(2)"] {
        let (status, body) = post(app.clone(), "/", expression).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{expression}");
        assert!(body.starts_with("error: malformed expression: "), "{body}");
    }
    assert_eq!(any_call.calls(), 0);
}

#[tokio::test]
async fn operation_outage_fails_without_partial_result() {
    let server = MockServer::start();
    let _mul = server.mock(|when, then| {
        when.method(POST).path("/multiplication");
        then.status(200).body("8");
    });
    let _sum = server.mock(|when, then| {
        when.method(POST).path("/sum");
        then.status(503).body("down");
    });
    let measures = server.mock(|when, then| {
        when.method(POST).path("/measures");
        then.status(200);
    });

    let (status, body) = post(app(&config_for(&server)), "/", "3 + 4 * 2").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.starts_with("error: remote operation failed: Sum service"), "{body}");
    assert!(!body.contains("result ="));
    assert_eq!(measures.calls(), 0, "failed evaluations are not reported");
}

#[tokio::test]
async fn unreachable_operation_service_is_a_gateway_error() {
    let server = MockServer::start();
    let mut config = config_for(&server);
    config.operations.division = "http://127.0.0.1:1".to_owned();

    let (status, body) = post(app(&config), "/", "1 / 2").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Division service unreachable"), "{body}");
}

#[tokio::test]
async fn metrics_outage_does_not_affect_response() {
    let server = MockServer::start();
    let _sum = server.mock(|when, then| {
        when.method(POST).path("/sum").body("1 2");
        then.status(200).body("3");
    });
    let measures = server.mock(|when, then| {
        when.method(POST).path("/measures");
        then.status(500);
    });

    let (status, body) = post(app(&config_for(&server)), "/", "1 + 2").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("result = 3\r\noperations timings:\r\nSum: 1 + 2 = 3 ("));
    assert_eq!(measures.calls(), 1);
}

#[tokio::test]
async fn unreachable_collector_does_not_affect_response() {
    let server = MockServer::start();
    let _sum = server.mock(|when, then| {
        when.method(POST).path("/sum");
        then.status(200).body("3");
    });
    let mut config = config_for(&server);
    config.metrics.url = "http://127.0.0.1:1/measures".to_owned();

    let (status, body) = post(app(&config), "/", "1 + 2").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("result = 3\r\n"));
}

#[tokio::test]
async fn hanging_collector_is_cut_off_by_its_timeout() {
    let server = MockServer::start();
    let _sum = server.mock(|when, then| {
        when.method(POST).path("/sum").body("1 2");
        then.status(200).body("3");
    });
    let measures = server.mock(|when, then| {
        when.method(POST).path("/measures");
        then.status(200).delay(Duration::from_secs(5));
    });
    let mut config = config_for(&server);
    config.metrics.timeout_ms = 300;

    let started = Instant::now();
    let (status, body) = post(app(&config), "/", "1 + 2").await;
    let elapsed = started.elapsed();

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("result = 3\r\n"), "{body}");
    assert!(
        elapsed < Duration::from_secs(2),
        "response waited {elapsed:?} on the collector"
    );
    assert_eq!(measures.calls(), 1);
}

#[tokio::test]
async fn disabled_metrics_sends_no_report() {
    let server = MockServer::start();
    let _sum = server.mock(|when, then| {
        when.method(POST).path("/sum");
        then.status(200).body("3");
    });
    let measures = server.mock(|when, then| {
        when.method(POST).path("/measures");
        then.status(200);
    });
    let mut config = config_for(&server);
    config.metrics.enabled = false;

    let (status, _body) = post(app(&config), "/", "1 + 2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(measures.calls(), 0);
}

#[tokio::test]
async fn huge_results_are_rendered_in_exponent_form() {
    let server = MockServer::start();
    let mul = server.mock(|when, then| {
        when.method(POST).path("/multiplication").body("1e+200 1e+100");
        then.status(200).body("1e300");
    });
    let _measures = server.mock(|when, then| {
        when.method(POST).path("/measures");
        then.status(200);
    });

    let expression = format!("1{} * 1{}", "0".repeat(200), "0".repeat(100));
    let (status, body) = post(app(&config_for(&server)), "/", &expression).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("result = 1e+300\r\n"), "{body}");
    assert!(body.contains("Multiplication: 1e+200 * 1e+100 = 1e+300 ("), "{body}");
    mul.assert();
}

#[tokio::test]
async fn health_endpoint_answers() {
    let server = MockServer::start();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app(&config_for(&server)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn invalid_endpoint_fails_init() {
    let config = CalcGatewayConfig {
        operations: OperationEndpoints {
            sum: "::not-a-url::".to_owned(),
            ..OperationEndpoints::default()
        },
        ..CalcGatewayConfig::default()
    };
    assert!(CalcGateway::init(&config).is_err());
}

#[tokio::test]
async fn local_client_evaluates_in_process() {
    let server = MockServer::start();
    let _sub = server.mock(|when, then| {
        when.method(POST).path("/subtraction").body("10 3");
        then.status(200).body("7");
    });
    let mut config = config_for(&server);
    config.metrics.enabled = false;

    let client = CalcGateway::init(&config).unwrap().client();

    let evaluation = client.evaluate("10 - 3").await.unwrap();
    assert_eq!(evaluation.result, 7.0);
    assert_eq!(evaluation.operations.len(), 1);
    assert_eq!(evaluation.operations[0].a, 10.0);
    assert_eq!(evaluation.operations[0].b, 3.0);

    let err = client.evaluate("(10 - 3").await.unwrap_err();
    assert_eq!(
        err,
        CalcGatewayError::MalformedExpression("unbalanced parentheses".to_owned())
    );
}
