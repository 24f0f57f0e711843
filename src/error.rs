use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Error taxonomy of the attendance ledger.
///
/// `InvalidArgument` is always raised before any store access; `NotFound` only
/// comes out of the by-id path (the natural-key path falls back to creation).
/// Everything the store itself reports surfaces as `StoreUnavailable`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("No record with that id.")]
    NotFound,

    #[error("Attendance store unavailable")]
    StoreUnavailable(#[from] sqlx::Error),
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::StoreUnavailable(e) = self {
            tracing::error!(error = %e, "Attendance store failure");
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}
