#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

//! In-memory port implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use calc_gateway_sdk::Operator;

use crate::domain::error::{MetricsDeliveryError, RemoteFailureKind, RemoteOperationError};
use crate::domain::metrics::MetricsReport;
use crate::domain::ports::{MetricsPort, OperationPort};

/// Computes operations locally and records every call it receives.
#[derive(Default)]
pub struct LocalArithmetic {
    calls: Mutex<Vec<(Operator, f64, f64)>>,
    failing: Option<Operator>,
}

impl LocalArithmetic {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose `operator` service is down.
    #[must_use]
    pub fn failing(operator: Operator) -> Self {
        Self {
            calls: Mutex::default(),
            failing: Some(operator),
        }
    }

    /// Calls received so far, including the failed ones.
    #[must_use]
    pub fn calls(&self) -> Vec<(Operator, f64, f64)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OperationPort for LocalArithmetic {
    async fn compute(&self, operator: Operator, a: f64, b: f64) -> Result<f64, RemoteOperationError> {
        self.calls.lock().unwrap().push((operator, a, b));
        if self.failing == Some(operator) {
            return Err(RemoteOperationError::new(
                operator,
                RemoteFailureKind::Transport,
                "connection refused",
            ));
        }
        Ok(match operator {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => a / b,
        })
    }
}

/// Collector that records reports, or rejects all of them.
#[derive(Default)]
pub struct RecordingMetrics {
    reports: Mutex<Vec<MetricsReport>>,
    attempts: Mutex<usize>,
    fail: bool,
}

impl RecordingMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn reports(&self) -> Vec<MetricsReport> {
        self.reports.lock().unwrap().clone()
    }

    #[must_use]
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl MetricsPort for RecordingMetrics {
    async fn publish(&self, report: &MetricsReport) -> Result<(), MetricsDeliveryError> {
        *self.attempts.lock().unwrap() += 1;
        if self.fail {
            return Err(MetricsDeliveryError("collector unavailable".to_owned()));
        }
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}
