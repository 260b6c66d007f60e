//! Calc Gateway Module
//!
//! Exposes a plain-text REST endpoint that evaluates infix arithmetic
//! expressions. Every binary operation is delegated to its own remote
//! operation service; per-operation timings are returned to the caller and
//! reported to a metrics collector.
//!
//! ## Architecture
//!
//! - `domain` compiles expressions to postfix and evaluates them through the
//!   `OperationPort`, reporting through the `MetricsPort`
//! - `infra` implements both ports over HTTP
//! - `api::rest` handlers call `Service` directly
//! - in-process consumers use `CalcGatewayLocalClient` via the SDK's
//!   `CalcGatewayClient` trait

// === PUBLIC API (from SDK) ===
pub use calc_gateway_sdk::{
    CalcGatewayClient, CalcGatewayError, EvaluationResult, OperationResult, Operator,
};

// === MODULE DEFINITION ===
pub mod config;
pub mod module;
pub use config::CalcGatewayConfig;
pub use module::CalcGateway;

// === LOCAL CLIENT ===
pub mod local_client;

// === INTERNAL MODULES ===
// Exposed for integration tests; only the SDK types are a stable API.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;
