//! Calc Gateway SDK
//!
//! This crate provides everything needed to consume the `calc_gateway` service:
//! - API trait (`CalcGatewayClient`)
//! - Models (`Operator`, `OperationResult`, `EvaluationResult`)
//! - Error types (`CalcGatewayError`)
//!
//! ## Usage
//!
//! ```ignore
//! use calc_gateway_sdk::CalcGatewayClient;
//!
//! let client: Arc<dyn CalcGatewayClient> = gateway.client();
//! let evaluation = client.evaluate("3 + 4 * 2").await?;
//! assert_eq!(evaluation.result, 11.0);
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

mod api;
mod errors;
mod models;

pub use api::CalcGatewayClient;
pub use errors::CalcGatewayError;
pub use models::{
    format_number, operation_name, Associativity, EvaluationResult, OperationResult, Operator,
};
