use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tardi_core::errors::{DecodeError, Error as CoreError};
use thiserror::Error;

/// Message returned for every failure whose details stay server-side.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Unavailable(String),
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        ApiError::Core(CoreError::Decode(err))
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Every failure answers 400, matching the function this service replaces;
        // only caller mistakes get their message echoed back.
        let (status, msg) = match &self {
            ApiError::Core(e) if e.is_client_error() => {
                tracing::warn!("Rejected request: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Core(e) => {
                tracing::error!("Request failed: {}", e);
                (StatusCode::BAD_REQUEST, INTERNAL_ERROR_MESSAGE.to_string())
            }
            ApiError::Unavailable(reason) => {
                tracing::error!("Service unavailable: {}", reason);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
