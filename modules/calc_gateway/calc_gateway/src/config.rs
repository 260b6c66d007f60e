use std::time::Duration;

use calc_gateway_sdk::Operator;
use serde::{Deserialize, Serialize};

/// Configuration for the `calc_gateway` module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalcGatewayConfig {
    #[serde(default)]
    pub operations: OperationEndpoints,
    /// Upper bound for a single operation-service round-trip.
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Default for CalcGatewayConfig {
    fn default() -> Self {
        Self {
            operations: OperationEndpoints::default(),
            operation_timeout_ms: default_operation_timeout_ms(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl CalcGatewayConfig {
    #[must_use]
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

/// Base URLs of the four operation services, one per operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationEndpoints {
    #[serde(default = "default_sum_url")]
    pub sum: String,
    #[serde(default = "default_subtraction_url")]
    pub subtraction: String,
    #[serde(default = "default_multiplication_url")]
    pub multiplication: String,
    #[serde(default = "default_division_url")]
    pub division: String,
}

impl Default for OperationEndpoints {
    fn default() -> Self {
        Self {
            sum: default_sum_url(),
            subtraction: default_subtraction_url(),
            multiplication: default_multiplication_url(),
            division: default_division_url(),
        }
    }
}

impl OperationEndpoints {
    /// Same host for every operator, one port each (the usual deployment).
    #[must_use]
    pub fn for_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            sum: format!("{base}/sum"),
            subtraction: format!("{base}/subtraction"),
            multiplication: format!("{base}/multiplication"),
            division: format!("{base}/division"),
        }
    }

    #[must_use]
    pub fn endpoint(&self, op: Operator) -> &str {
        match op {
            Operator::Add => &self.sum,
            Operator::Subtract => &self.subtraction,
            Operator::Multiply => &self.multiplication,
            Operator::Divide => &self.division,
        }
    }
}

/// When the metrics report is sent relative to the client response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsDelivery {
    /// Send before writing the response; the collector timeout adds to client latency.
    Inline,
    /// Send from a spawned task; the response is written immediately.
    #[default]
    Background,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_url")]
    pub url: String,
    #[serde(default = "default_metrics_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub delivery: MetricsDelivery,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            url: default_metrics_url(),
            timeout_ms: default_metrics_timeout_ms(),
            delivery: MetricsDelivery::default(),
        }
    }
}

impl MetricsConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_sum_url() -> String {
    "http://10.10.10.100:31001".to_owned()
}

fn default_subtraction_url() -> String {
    "http://10.10.10.100:31002".to_owned()
}

fn default_multiplication_url() -> String {
    "http://10.10.10.100:31003".to_owned()
}

fn default_division_url() -> String {
    "http://10.10.10.100:31004".to_owned()
}

fn default_operation_timeout_ms() -> u64 {
    5000
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_metrics_url() -> String {
    "http://10.10.10.230:50060/measures".to_owned()
}

fn default_metrics_timeout_ms() -> u64 {
    2000
}
