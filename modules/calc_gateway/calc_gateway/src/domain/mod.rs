//! Domain layer for `calc_gateway` module
//!
//! Contains the expression compiler, the postfix evaluator and the service
//! orchestrating remote operations and metrics reporting.

pub mod dispatcher;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod metrics;
pub mod ports;
pub mod service;

pub use error::{DomainError, MalformedExpression, MetricsDeliveryError, RemoteFailureKind, RemoteOperationError};
pub use service::Service;
