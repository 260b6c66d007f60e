//! Best-effort reporting of evaluation timings to the metrics collector.

use std::sync::Arc;

use calc_gateway_sdk::EvaluationResult;
use tracing::{debug, warn};

use crate::config::MetricsDelivery;
use crate::domain::ports::MetricsPort;

/// One report per evaluated expression. Built once, sent once, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport {
    pub expression: String,
    pub evaluation: EvaluationResult,
}

impl MetricsReport {
    #[must_use]
    pub fn new(expression: impl Into<String>, evaluation: EvaluationResult) -> Self {
        Self {
            expression: expression.into(),
            evaluation,
        }
    }
}

/// Sends reports without ever failing the caller.
#[derive(Clone)]
pub struct MetricsReporter {
    port: Option<Arc<dyn MetricsPort>>,
    delivery: MetricsDelivery,
}

impl MetricsReporter {
    #[must_use]
    pub fn new(port: Arc<dyn MetricsPort>, delivery: MetricsDelivery) -> Self {
        Self {
            port: Some(port),
            delivery,
        }
    }

    /// Reporter that drops every report.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            port: None,
            delivery: MetricsDelivery::Inline,
        }
    }

    /// Deliver `report` according to the configured mode.
    ///
    /// `Inline` waits for the collector (bounded by the adapter's timeout);
    /// `Background` returns immediately and sends from a spawned task.
    pub async fn report(&self, report: MetricsReport) {
        let Some(port) = &self.port else {
            return;
        };

        match self.delivery {
            MetricsDelivery::Inline => send(port.as_ref(), &report).await,
            MetricsDelivery::Background => {
                let port = Arc::clone(port);
                tokio::spawn(async move {
                    send(port.as_ref(), &report).await;
                });
            }
        }
    }
}

async fn send(port: &dyn MetricsPort, report: &MetricsReport) {
    match port.publish(report).await {
        Ok(()) => debug!(expression = %report.expression, "Measures sent to metrics collector"),
        Err(e) => warn!(
            error = %e,
            expression = %report.expression,
            "Failed to send measures to metrics collector"
        ),
    }
}
