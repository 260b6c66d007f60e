//! Outbound ports implemented by the infrastructure adapters.

use async_trait::async_trait;
use calc_gateway_sdk::Operator;

use crate::domain::error::{MetricsDeliveryError, RemoteOperationError};
use crate::domain::metrics::MetricsReport;

/// Remote arithmetic backend: one round-trip per binary operation.
#[async_trait]
pub trait OperationPort: Send + Sync {
    /// Compute `a <operator> b`. Operand order is significant for `-` and `/`.
    async fn compute(&self, operator: Operator, a: f64, b: f64) -> Result<f64, RemoteOperationError>;
}

/// Metrics collector receiving one report per evaluated expression.
#[async_trait]
pub trait MetricsPort: Send + Sync {
    async fn publish(&self, report: &MetricsReport) -> Result<(), MetricsDeliveryError>;
}
