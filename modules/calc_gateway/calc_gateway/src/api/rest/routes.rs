//! Route registration for `calc_gateway` module

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::domain::Service;

use super::handlers;

/// Path of the versioned evaluation endpoint.
pub const EVALUATE_PATH: &str = "/calculator-gateway/v1/evaluate";

/// Register all REST routes for `calc_gateway` module.
///
/// `POST /` is kept alongside the versioned path so that existing clients
/// posting the bare expression to the root keep working.
#[must_use]
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route("/", post(handlers::evaluate_expression))
        .route(EVALUATE_PATH, post(handlers::evaluate_expression))
        .route("/health", get(handlers::health))
        .layer(Extension(service))
}
