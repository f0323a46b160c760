use tokio::sync::oneshot;

use crate::domain::{
    BulkRemoval, Principal, Product, ProductCreate, ProductPatch, RatingSummary, ReviewDraft,
    ReviewListing,
};
use crate::error::{CatalogError, ReviewError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enums for actor communication. Each variant includes
/// parameters and a oneshot channel for responses.

#[derive(Debug)]
pub enum CatalogRequest {
    CreateProduct {
        create: ProductCreate,
        respond_to: ServiceResponse<String, CatalogError>,
    },
    GetProduct {
        id: String,
        respond_to: ServiceResponse<Option<Product>, CatalogError>,
    },
    ListProducts {
        respond_to: ServiceResponse<Vec<Product>, CatalogError>,
    },
    UpdateProduct {
        id: String,
        patch: ProductPatch,
        respond_to: ServiceResponse<Product, CatalogError>,
    },
    /// Deleting a product cascades deletion of all reviews it owns.
    DeleteProduct {
        id: String,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    UpsertReview {
        product_id: String,
        draft: ReviewDraft,
        respond_to: ServiceResponse<RatingSummary, CatalogError>,
    },
    ListReviews {
        product_id: String,
        respond_to: ServiceResponse<ReviewListing, CatalogError>,
    },
    DeleteReview {
        product_id: String,
        reviewer_id: String,
        respond_to: ServiceResponse<RatingSummary, CatalogError>,
    },
    Shutdown,
    #[cfg(test)]
    GetProductCount {
        respond_to: ServiceResponse<usize, CatalogError>,
    },
}

#[derive(Debug)]
pub enum ReviewRequest {
    SubmitReview {
        principal: Principal,
        product_id: String,
        rating: u8,
        comment: String,
        respond_to: ServiceResponse<RatingSummary, ReviewError>,
    },
    ListReviews {
        product_id: String,
        respond_to: ServiceResponse<ReviewListing, ReviewError>,
    },
    DeleteReview {
        principal: Principal,
        product_id: String,
        /// Review owner to delete; `None` targets the caller's own review.
        target_reviewer: Option<String>,
        respond_to: ServiceResponse<RatingSummary, ReviewError>,
    },
    RemoveProducts {
        ids: Vec<String>,
        respond_to: ServiceResponse<BulkRemoval, ReviewError>,
    },
    Shutdown,
}
