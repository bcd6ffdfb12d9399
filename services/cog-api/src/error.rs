//! Request errors and their HTTP mapping.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cog_pipeline::PipelineError;
use serde_json::json;
use thiserror::Error;

/// Failures surfaced to HTTP clients.
///
/// Every upload and conversion failure is a `400` with `{"error": msg}`;
/// clients do not get a per-kind status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file part")]
    NoFilePart,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Label for the failure counter.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Pipeline(e) => e.kind(),
            ApiError::NotFound(_) => "not_found",
            ApiError::Internal(_) => "internal",
            _ => "upload",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        assert_eq!(ApiError::NoFilePart.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoSelectedFile.status(), StatusCode::BAD_REQUEST);
        let encoding = ApiError::from(PipelineError::Encoding {
            message: "bad driver".to_string(),
        });
        assert_eq!(encoding.status(), StatusCode::BAD_REQUEST);
        assert_eq!(encoding.to_string(), "Error converting to COG: bad driver");
        assert_eq!(encoding.kind(), "encoding");
    }

    #[test]
    fn test_missing_artifact_is_not_found() {
        let err = ApiError::NotFound("B04_COG.tif".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
