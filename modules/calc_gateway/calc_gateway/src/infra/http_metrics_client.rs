use std::time::Duration;

use async_trait::async_trait;
use calc_gateway_sdk::OperationResult;
use serde::Serialize;
use tracing::instrument;
use url::Url;

use crate::domain::error::MetricsDeliveryError;
use crate::domain::metrics::MetricsReport;
use crate::domain::ports::MetricsPort;

/// Wire format expected by the metrics collector.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasuresPayload<'a> {
    pub expression: &'a str,
    pub result: f64,
    pub total_duration_ms: f64,
    pub operations: Vec<OperationMeasure>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationMeasure {
    pub operator: char,
    pub name: &'static str,
    pub a: f64,
    pub b: f64,
    pub result: f64,
    pub duration_ms: f64,
}

impl From<&OperationResult> for OperationMeasure {
    fn from(op: &OperationResult) -> Self {
        Self {
            operator: op.operator.symbol(),
            name: op.name(),
            a: op.a,
            b: op.b,
            result: op.result,
            duration_ms: op.duration_ms,
        }
    }
}

impl<'a> From<&'a MetricsReport> for MeasuresPayload<'a> {
    fn from(report: &'a MetricsReport) -> Self {
        Self {
            expression: &report.expression,
            result: report.evaluation.result,
            total_duration_ms: report.evaluation.total_duration_ms,
            operations: report
                .evaluation
                .operations
                .iter()
                .map(OperationMeasure::from)
                .collect(),
        }
    }
}

/// HTTP adapter implementing the `MetricsPort`: one JSON `POST` per report.
pub struct HttpMetricsClient {
    client: reqwest::Client,
    url: Url,
    timeout: Duration,
}

impl HttpMetricsClient {
    /// # Errors
    /// Returns an error if `url` is not a valid absolute URL.
    pub fn new(client: reqwest::Client, url: &str, timeout: Duration) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            url: Url::parse(url)?,
            timeout,
        })
    }
}

#[async_trait]
impl MetricsPort for HttpMetricsClient {
    #[instrument(skip_all, fields(url = %self.url))]
    async fn publish(&self, report: &MetricsReport) -> Result<(), MetricsDeliveryError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&MeasuresPayload::from(report))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| MetricsDeliveryError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MetricsDeliveryError(format!("HTTP {}", response.status())));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use calc_gateway_sdk::{EvaluationResult, Operator};
    use serde_json::json;

    use super::*;

    #[test]
    fn payload_uses_collector_field_names() {
        let report = MetricsReport::new(
            "10 / 4",
            EvaluationResult::new(
                2.5,
                vec![OperationResult {
                    operator: Operator::Divide,
                    a: 10.0,
                    b: 4.0,
                    result: 2.5,
                    duration_ms: 1.5,
                }],
            ),
        );

        let value = serde_json::to_value(MeasuresPayload::from(&report)).unwrap();

        assert_eq!(
            value,
            json!({
                "expression": "10 / 4",
                "result": 2.5,
                "totalDurationMs": 1.5,
                "operations": [{
                    "operator": "/",
                    "name": "Division",
                    "a": 10.0,
                    "b": 4.0,
                    "result": 2.5,
                    "durationMs": 1.5
                }]
            })
        );
    }
}
