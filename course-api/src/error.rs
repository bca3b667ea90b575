use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use course_catalog::ProductError;
use course_core::CoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            // Repositories reject invalid products before touching storage
            CoreError::Repository(source) => match source.downcast::<ProductError>() {
                Ok(invalid) => AppError::ValidationError(invalid.to_string()),
                Err(source) => AppError::Anyhow(CoreError::Repository(source).into()),
            },
        }
    }
}
