// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of [`KennelError`] onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kennel_core::KennelError;

/// Handler error wrapper so `?` on store calls produces a response.
#[derive(Debug)]
pub struct ApiError(pub KennelError);

impl From<KennelError> for ApiError {
    fn from(err: KennelError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code the error maps to.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            KennelError::Validation { .. } => StatusCode::BAD_REQUEST,
            KennelError::NotFound { .. } => StatusCode::NOT_FOUND,
            KennelError::Config(_) | KennelError::Storage { .. } | KennelError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.0 {
            KennelError::Validation { .. } => {
                tracing::debug!(error = %self.0, "rejected request");
                (status, self.0.to_string()).into_response()
            }
            // An absent record is an expected outcome, not a failure.
            KennelError::NotFound { .. } => status.into_response(),
            err => {
                tracing::error!(error = %err, "request failed");
                (status, "internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError(KennelError::validation("name", "must not be empty"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = ApiError(KennelError::NotFound { id: 9 }).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_maps_to_500() {
        let err = ApiError(KennelError::Storage {
            source: Box::new(std::io::Error::other("disk on fire")),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
