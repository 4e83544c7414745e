use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{entity} with id {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        AppError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Value of the `type` field in the error body.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "EntityNotFoundException",
            AppError::BadRequest(_) => "BadRequestException",
            AppError::Forbidden(_) | AppError::Jwt(_) => "AccessDeniedException",
            AppError::Database(_) => "InternalServerError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            // Unauthenticated callers get the same 403 as under-privileged ones.
            AppError::Forbidden(_) | AppError::Jwt(_) => StatusCode::FORBIDDEN,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::NotFound { .. } => self.to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Forbidden(msg) => {
                tracing::debug!("Access denied: {msg}");
                "Access Denied".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("Rejected token: {e}");
                "Access Denied".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                "Internal server error".to_string()
            }
        };

        let body = json!({ "type": self.kind(), "message": message });
        (self.status(), Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
