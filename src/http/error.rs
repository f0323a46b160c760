use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::{AuthError, CatalogError, ReviewError};

/// Boundary error: wraps the domain error kinds and maps each to an HTTP
/// status. Authentication failures (401) and authorization failures (403)
/// stay externally distinct; internal failures never leak actor or
/// storage detail to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error("Product not found: {0}")]
    ProductMissing(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(AuthError::MissingCredential)
            | ApiError::Auth(AuthError::InvalidCredential(_)) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::MissingRole(_)) => StatusCode::FORBIDDEN,
            ApiError::Auth(AuthError::DirectoryUnavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Catalog(CatalogError::ProductNotFound(_))
            | ApiError::Catalog(CatalogError::ReviewNotFound { .. })
            | ApiError::Review(ReviewError::ProductNotFound(_))
            | ApiError::Review(ReviewError::ReviewNotFound { .. })
            | ApiError::ProductMissing(_) => StatusCode::NOT_FOUND,
            ApiError::Catalog(CatalogError::InvalidRating(_))
            | ApiError::Review(ReviewError::InvalidRating(_)) => StatusCode::BAD_REQUEST,
            ApiError::Review(ReviewError::NotReviewOwner { .. }) => StatusCode::FORBIDDEN,
            ApiError::Catalog(CatalogError::ActorCommunicationError(_))
            | ApiError::Review(ReviewError::ActorCommunicationError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn public_message(&self) -> String {
        match self.status() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": self.public_message(),
        }));
        (self.status(), body).into_response()
    }
}
