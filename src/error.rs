use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::plans::codec::CodecError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("availability codec: {0}")]
    Codec(#[from] CodecError),

    #[error("timestamp: {0}")]
    Clock(#[from] time::error::Format),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Storage(_) | AppError::Codec(_) | AppError::Clock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation(msg) => {
                warn!(error = %msg, "validation failed");
                json!({ "ok": false, "error": msg })
            }
            AppError::Forbidden => {
                warn!("admin access denied");
                json!({ "detail": "Forbidden" })
            }
            AppError::Storage(_) | AppError::Codec(_) | AppError::Clock(_) => {
                error!(error = %self, "request failed");
                json!({ "ok": false, "error": "internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}
