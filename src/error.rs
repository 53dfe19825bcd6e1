use crate::render::View;
use crate::storage::StorageError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;

/// Route-level error taxonomy and its response mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("authentication required")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // A missing session redirects to the login page, never an error
            // status.
            AppError::Unauthorized => Redirect::to("/login").into_response(),
            AppError::Storage(StorageError::NotFound(id)) => {
                tracing::warn!(%id, "document not found");
                View::new("errors/404")
                    .status(StatusCode::NOT_FOUND)
                    .into_response()
            }
            AppError::Storage(err) => {
                tracing::error!(error = %err, "store operation failed");
                View::new("errors/500")
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .into_response()
            }
        }
    }
}
