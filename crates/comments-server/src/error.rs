use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use comments_shared::ErrorResponse;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Comment not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        source: StoreError,
    },
}

impl AppError {
    /// Wraps a store failure with the route's "Failed to ..." message
    /// for the 500 body.
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Storage { context, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Comment not found".to_string(), None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Storage { context, source } => {
                tracing::error!("{}: {:?}", context, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    context.to_string(),
                    Some(source.to_string()),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            error,
        });

        (status, body).into_response()
    }
}
