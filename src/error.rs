use thiserror::Error;

use crate::domain::Role;

/// Authentication and authorization failures. The first two variants are
/// authentication failures (no usable identity); `MissingRole` is an
/// authorization failure for an already-resolved identity. The HTTP
/// boundary maps them to distinct statuses (401 vs 403).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Authentication required: no credential presented")]
    MissingCredential,
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),
    #[error("Missing required role: {0:?}")]
    MissingRole(Vec<Role>),
    #[error("Directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DirectoryError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User rejected: {0}")]
    Rejected(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Review not found for product {product_id} by reviewer {reviewer_id}")]
    ReviewNotFound {
        product_id: String,
        reviewer_id: String,
    },
    #[error("Invalid rating: {0} (accepted range 1-5)")]
    InvalidRating(u8),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Review not found for product {product_id} by reviewer {reviewer_id}")]
    ReviewNotFound {
        product_id: String,
        reviewer_id: String,
    },
    #[error("Invalid rating: {0} (accepted range 1-5)")]
    InvalidRating(u8),
    #[error("Reviewer {principal_id} may not remove a review owned by {owner_id}")]
    NotReviewOwner {
        principal_id: String,
        owner_id: String,
    },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<CatalogError> for ReviewError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ProductNotFound(id) => ReviewError::ProductNotFound(id),
            CatalogError::ReviewNotFound {
                product_id,
                reviewer_id,
            } => ReviewError::ReviewNotFound {
                product_id,
                reviewer_id,
            },
            CatalogError::InvalidRating(rating) => ReviewError::InvalidRating(rating),
            CatalogError::ActorCommunicationError(msg) => {
                ReviewError::ActorCommunicationError(msg)
            }
        }
    }
}
