use std::sync::Arc;
use std::time::Instant;

use calc_gateway_sdk::{OperationResult, Operator};
use tracing::{debug, instrument};

use crate::domain::error::RemoteOperationError;
use crate::domain::ports::OperationPort;

/// Sends one binary operation to its remote service and times the round-trip.
#[derive(Clone)]
pub struct OperationDispatcher {
    port: Arc<dyn OperationPort>,
}

impl OperationDispatcher {
    #[must_use]
    pub fn new(port: Arc<dyn OperationPort>) -> Self {
        Self { port }
    }

    /// Compute `a <operator> b` remotely.
    ///
    /// # Errors
    /// Propagates the port's [`RemoteOperationError`] unchanged; there is no retry.
    #[instrument(skip(self), fields(operator = %operator))]
    pub async fn dispatch(
        &self,
        a: f64,
        b: f64,
        operator: Operator,
    ) -> Result<OperationResult, RemoteOperationError> {
        let start = Instant::now();
        let result = self.port.compute(operator, a, b).await?;
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        debug!(result, duration_ms, "Remote operation completed");
        Ok(OperationResult {
            operator,
            a,
            b,
            result,
            duration_ms,
        })
    }
}
