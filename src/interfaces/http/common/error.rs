//! Uniform error response for the account API
//!
//! Every failure on `/api/users` leaves through [`ApiError`] as status 400
//! with `{"message": "..."}`. The 405 for unsupported methods is produced by
//! the dispatcher itself and does not pass through here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::shared::DomainError;

/// Error body returned on any failed account operation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// String representation of the error
    pub message: String,
}

/// Any failed account operation, on its way out as a 400.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        if self.0.is_internal() {
            error!(error = %message, "Account operation failed");
        } else {
            warn!(error = %message, "Account request rejected");
        }

        (StatusCode::BAD_REQUEST, Json(ErrorBody { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: DomainError) -> (StatusCode, ErrorBody) {
        let resp = ApiError::from(err).into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn every_domain_error_is_a_400_with_its_message() {
        let cases = [
            DomainError::Validation("Invalid JSON: EOF".into()),
            DomainError::account_not_found("ana@x.com"),
            DomainError::Conflict("Email already exists".into()),
            DomainError::Storage("disk full".into()),
            DomainError::Crypto("bad cost".into()),
        ];

        for err in cases {
            let expected = err.to_string();
            let (status, body) = body_of(err).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body.message, expected);
        }
    }
}
