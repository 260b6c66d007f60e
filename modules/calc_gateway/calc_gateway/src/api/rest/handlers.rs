use std::sync::Arc;

use axum::Extension;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http::StatusCode;
use http::header::CONTENT_TYPE;
use tracing::{debug, info};

use crate::api::rest::TEXT_PLAIN_UTF_8;
use crate::api::rest::error::ApiResult;
use crate::api::rest::render::render_evaluation;
use crate::domain::service::Service;

/// Evaluate the infix expression carried in the raw request body.
///
/// An empty body gets an empty `200` without touching any backend.
///
/// # Errors
/// Returns an [`ApiError`](crate::api::rest::error::ApiError) rendered as `400`
/// for a malformed expression, or `502`/`504` when an operation service fails.
#[tracing::instrument(skip(svc, body), fields(body_len = body.len()))]
pub async fn evaluate_expression(
    Extension(svc): Extension<Arc<Service>>,
    body: Bytes,
) -> ApiResult<Response> {
    if body.is_empty() {
        debug!("Empty body, nothing to evaluate");
        return Ok(text(String::new()));
    }

    let expression = String::from_utf8_lossy(&body);
    info!("New request");

    let evaluation = svc.evaluate(&expression).await?;
    Ok(text(render_evaluation(&evaluation)))
}

/// Liveness check.
#[allow(clippy::unused_async)]
pub async fn health() -> &'static str {
    "ok"
}

fn text(body: String) -> Response {
    (StatusCode::OK, [(CONTENT_TYPE, TEXT_PLAIN_UTF_8)], body).into_response()
}
