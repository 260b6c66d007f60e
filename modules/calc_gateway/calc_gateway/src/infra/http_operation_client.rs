use std::time::Duration;

use async_trait::async_trait;
use calc_gateway_sdk::{Operator, format_number};
use http::header::CONTENT_TYPE;
use tracing::instrument;
use url::Url;

use crate::config::OperationEndpoints;
use crate::domain::error::{RemoteFailureKind, RemoteOperationError};
use crate::domain::expression::parse_number;
use crate::domain::ports::OperationPort;

/// Longest slice of an unexpected response body kept in error messages.
const BODY_PREVIEW_LEN: usize = 64;

/// HTTP adapter implementing the `OperationPort`.
///
/// Holds one base URL per operator. Each call is a `POST` with body
/// `"<a> <b>"`; the service answers with the result as plain text.
///
/// `reqwest::Client` is `Clone + Send + Sync`, so no external locking is needed.
pub struct HttpOperationClient {
    client: reqwest::Client,
    sum: Url,
    subtraction: Url,
    multiplication: Url,
    division: Url,
    timeout: Duration,
}

impl HttpOperationClient {
    /// # Errors
    /// Returns an error if any endpoint is not a valid absolute URL.
    pub fn new(
        client: reqwest::Client,
        endpoints: &OperationEndpoints,
        timeout: Duration,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            sum: Url::parse(&endpoints.sum)?,
            subtraction: Url::parse(&endpoints.subtraction)?,
            multiplication: Url::parse(&endpoints.multiplication)?,
            division: Url::parse(&endpoints.division)?,
            timeout,
        })
    }

    fn endpoint(&self, operator: Operator) -> &Url {
        match operator {
            Operator::Add => &self.sum,
            Operator::Subtract => &self.subtraction,
            Operator::Multiply => &self.multiplication,
            Operator::Divide => &self.division,
        }
    }
}

fn transport_error(operator: Operator, err: &reqwest::Error) -> RemoteOperationError {
    let kind = if err.is_timeout() {
        RemoteFailureKind::Timeout
    } else {
        RemoteFailureKind::Transport
    };
    RemoteOperationError::new(operator, kind, err.to_string())
}

/// Request body: both operands in their shortest decimal form, space separated.
fn operands_body(a: f64, b: f64) -> String {
    format!("{} {}", format_number(a), format_number(b))
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_LEN).collect()
}

#[async_trait]
impl OperationPort for HttpOperationClient {
    #[instrument(
        skip_all,
        fields(operator = %operator, endpoint = %self.endpoint(operator))
    )]
    async fn compute(&self, operator: Operator, a: f64, b: f64) -> Result<f64, RemoteOperationError> {
        let response = self
            .client
            .post(self.endpoint(operator).clone())
            .header(CONTENT_TYPE, "text/plain")
            .body(operands_body(a, b))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(operator, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(operator, &e))?;

        if !status.is_success() {
            return Err(RemoteOperationError::new(
                operator,
                RemoteFailureKind::Status(status.as_u16()),
                preview(&body),
            ));
        }

        parse_number(body.trim()).ok_or_else(|| {
            RemoteOperationError::new(
                operator,
                RemoteFailureKind::InvalidBody,
                format!("'{}' is not a finite number", preview(body.trim())),
            )
        })
    }
}
