//! Local client implementation of `CalcGatewayClient`
//!
//! Lets in-process consumers evaluate expressions without going through HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use calc_gateway_sdk::{CalcGatewayClient, CalcGatewayError, EvaluationResult};

use crate::domain::Service;

/// Local client that delegates to the module's `Service`.
pub struct CalcGatewayLocalClient {
    service: Arc<Service>,
}

impl CalcGatewayLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CalcGatewayClient for CalcGatewayLocalClient {
    async fn evaluate(&self, expression: &str) -> Result<EvaluationResult, CalcGatewayError> {
        self.service.evaluate(expression).await.map_err(Into::into)
    }
}
