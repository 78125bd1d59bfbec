//! Endpoint errors and their JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::provider::ProviderError;

pub const INVALID_UPLOAD: &str = "Please upload a valid image file.";
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Body of every non-200 response: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Wrong content type, missing file, or a non-image file.
    #[error("Please upload a valid image file.")]
    InvalidUpload,

    #[error("{0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidUpload => StatusCode::BAD_REQUEST,
            ApiError::Multipart(_) | ApiError::Provider(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_upload_is_client_error() {
        let err = ApiError::InvalidUpload;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), INVALID_UPLOAD);
    }

    #[test]
    fn provider_failures_are_server_errors() {
        let err = ApiError::from(ProviderError::Status {
            status: 503,
            body: "overloaded".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "API Error 503: overloaded");
    }

    #[test]
    fn blank_messages_fall_back() {
        let err = ApiError::Internal(String::new());
        assert_eq!(err.message(), UNKNOWN_ERROR);
    }
}
