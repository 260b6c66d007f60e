/// Error type for `CalcGateway` operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcGatewayError {
    /// The expression could not be reduced to a well-formed postfix sequence
    #[error("malformed expression: {0}")]
    MalformedExpression(String),

    /// An operation service failed or timed out
    #[error("remote operation failed: {0}")]
    RemoteOperation(String),
}

impl CalcGatewayError {
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedExpression(message.into())
    }

    #[must_use]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteOperation(message.into())
    }
}
