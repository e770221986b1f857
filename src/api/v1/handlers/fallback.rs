use axum::http::Uri;

use crate::error::AppError;

/// Any route the gateway does not serve.
pub async fn fallback(uri: Uri) -> AppError {
    AppError::not_found(uri.path())
}
