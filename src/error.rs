use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to store upload: {0}")]
    Upload(#[from] std::io::Error),

    #[error("Server misconfigured: {0}")]
    Misconfigured(&'static str),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Upload(_) | AppError::Misconfigured(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Store details stay in the log, not in the response body
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::Upload(e) => {
                tracing::error!("Upload error: {:?}", e);
                "Failed to store uploaded file".to_string()
            }
            AppError::Misconfigured(what) => {
                tracing::error!("Misconfiguration: {}", what);
                "Server is not properly configured".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound("Conference not found").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::BadRequest("bad".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthorized("no").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_response_status() {
        let response = AppError::NotFound("Staff member not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
