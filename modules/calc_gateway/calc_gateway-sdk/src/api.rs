//! API trait for `CalcGateway`

use async_trait::async_trait;

use crate::errors::CalcGatewayError;
use crate::models::EvaluationResult;

/// Calc Gateway API trait
///
/// Evaluates an infix arithmetic expression by delegating every binary
/// operation to its remote operation service.
///
/// Implemented by the module's local client, which delegates to the
/// module's internal `Service`.
#[async_trait]
pub trait CalcGatewayClient: Send + Sync {
    /// Evaluate `expression` and return the result with per-operation timings.
    async fn evaluate(&self, expression: &str) -> Result<EvaluationResult, CalcGatewayError>;
}
