use std::fmt;

use calc_gateway_sdk::{CalcGatewayError, Operator};
use thiserror::Error;

/// The input cannot be reduced to a single well-formed postfix sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedExpression {
    #[error("expression contains no tokens")]
    Empty,

    #[error("invalid token '{token}' at index {index}")]
    InvalidToken { token: String, index: usize },

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("operator '{operator}' is missing an operand")]
    MissingOperand { operator: Operator },

    #[error("{count} values left on the stack, expected exactly one")]
    DanglingOperands { count: usize },
}

/// Why an operation-service call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFailureKind {
    /// Connection refused, reset, DNS failure
    Transport,
    Timeout,
    /// Non-2xx HTTP status
    Status(u16),
    /// Body is not a finite decimal number
    InvalidBody,
}

impl fmt::Display for RemoteFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => f.write_str("unreachable"),
            Self::Timeout => f.write_str("timed out"),
            Self::Status(code) => write!(f, "returned HTTP {code}"),
            Self::InvalidBody => f.write_str("returned an invalid body"),
        }
    }
}

/// An operation service is unreachable, timed out, or answered garbage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} service {kind}: {message}", .operator.name())]
pub struct RemoteOperationError {
    pub operator: Operator,
    pub kind: RemoteFailureKind,
    pub message: String,
}

impl RemoteOperationError {
    #[must_use]
    pub fn new(operator: Operator, kind: RemoteFailureKind, message: impl Into<String>) -> Self {
        Self {
            operator,
            kind,
            message: message.into(),
        }
    }
}

/// The metrics collector could not be reached. Always absorbed by the reporter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("metrics delivery failed: {0}")]
pub struct MetricsDeliveryError(pub String);

/// Errors returned by the domain service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed expression: {0}")]
    Malformed(#[from] MalformedExpression),

    #[error("remote operation failed: {0}")]
    RemoteOperation(#[from] RemoteOperationError),
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for CalcGatewayError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::Malformed(e) => CalcGatewayError::malformed(e.to_string()),
            DomainError::RemoteOperation(e) => CalcGatewayError::remote(e.to_string()),
        }
    }
}
