use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lambda_runtime::tracing;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaceApiError {
    /// A required image part was not present in the request.
    #[error("{0}")]
    MissingUpload(&'static str),

    /// The multipart body could not be read; `status` comes from the parser
    /// (413 when the body limit was hit, 400 otherwise).
    #[error("{message}")]
    UnreadableUpload {
        message: &'static str,
        status: StatusCode,
    },

    #[error("object store error: {0}")]
    Storage(String),

    #[error("vision service error: {0}")]
    Vision(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl FaceApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            FaceApiError::MissingUpload(_) => StatusCode::BAD_REQUEST,
            FaceApiError::UnreadableUpload { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FaceApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_client_error() {
            self.to_string()
        } else {
            tracing::error!(error = %self, "request failed");
            "Internal Server Error".to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        let err = FaceApiError::MissingUpload("No image file uploaded");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "No image file uploaded");
    }

    #[test]
    fn test_unreadable_upload_keeps_parser_status() {
        let err = FaceApiError::UnreadableUpload {
            message: "No image file uploaded",
            status: StatusCode::PAYLOAD_TOO_LARGE,
        };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_string(), "No image file uploaded");
    }

    #[test]
    fn test_faults_hide_details() {
        let response = FaceApiError::Storage("AccessDenied".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
