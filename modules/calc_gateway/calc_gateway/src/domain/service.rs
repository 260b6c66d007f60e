//! Domain service for `calc_gateway`
//!
//! Compiles the expression, evaluates it through the remote operation
//! services and hands the timings to the metrics reporter.

use std::sync::Arc;

use calc_gateway_sdk::EvaluationResult;
use tracing::{debug, info, instrument, warn};

use crate::domain::dispatcher::OperationDispatcher;
use crate::domain::error::DomainError;
use crate::domain::evaluator;
use crate::domain::expression;
use crate::domain::metrics::{MetricsReport, MetricsReporter};
use crate::domain::ports::OperationPort;

/// Stateless across requests; safe to share behind an `Arc`.
pub struct Service {
    dispatcher: OperationDispatcher,
    reporter: MetricsReporter,
}

impl Service {
    #[must_use]
    pub fn new(operations: Arc<dyn OperationPort>, reporter: MetricsReporter) -> Self {
        Self {
            dispatcher: OperationDispatcher::new(operations),
            reporter,
        }
    }

    /// Evaluate an infix expression.
    ///
    /// A report is handed to the metrics reporter only after a successful
    /// evaluation; failed expressions are never reported.
    ///
    /// # Errors
    /// - [`DomainError::Malformed`] if the expression does not compile
    /// - [`DomainError::RemoteOperation`] if an operation service fails
    #[instrument(skip(self), fields(expression = %expression))]
    pub async fn evaluate(&self, expression: &str) -> Result<EvaluationResult, DomainError> {
        let postfix = expression::compile(expression).map_err(|e| {
            debug!(error = %e, "Expression rejected");
            e
        })?;
        debug!(postfix = %postfix, "Expression compiled");

        let evaluation = evaluator::evaluate(&postfix, &self.dispatcher)
            .await
            .map_err(|e| {
                warn!(error = %e, "Evaluation failed");
                e
            })?;

        info!(
            result = evaluation.result,
            operations = evaluation.operations.len(),
            total_duration_ms = evaluation.total_duration_ms,
            "{expression} = {}",
            evaluation.result
        );
        for op in &evaluation.operations {
            debug!("{op}");
        }

        self.reporter
            .report(MetricsReport::new(expression, evaluation.clone()))
            .await;

        Ok(evaluation)
    }
}
