use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::header::CONTENT_TYPE;

use crate::api::rest::TEXT_PLAIN_UTF_8;
use crate::domain::error::{DomainError, RemoteFailureKind};

/// Map a domain error to a plain-text error response.
///
/// Malformed input is the client's fault (`400`); a failing operation service
/// is reported as a gateway failure (`502`, or `504` on timeout).
#[must_use]
pub fn domain_error_to_response(e: &DomainError) -> Response {
    let status = match e {
        DomainError::Malformed(_) => StatusCode::BAD_REQUEST,
        DomainError::RemoteOperation(remote) if remote.kind == RemoteFailureKind::Timeout => {
            StatusCode::GATEWAY_TIMEOUT
        }
        DomainError::RemoteOperation(_) => StatusCode::BAD_GATEWAY,
    };

    if status.is_server_error() {
        tracing::error!(error = %e, status = status.as_u16(), "Request failed on remote operation");
    }

    (status, [(CONTENT_TYPE, TEXT_PLAIN_UTF_8)], format!("error: {e}\r\n")).into_response()
}

/// Handler error wrapper so `?` works on domain results.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        domain_error_to_response(&self.0)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
