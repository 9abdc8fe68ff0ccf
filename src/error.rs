use axum::{
    http::{StatusCode, header::InvalidHeaderValue},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures that cannot be shown inside a page.
///
/// User-facing problems (validation, backend rejections, network errors)
/// are rendered by the page controllers and never reach this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid response header: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
    }
}
