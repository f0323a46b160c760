use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::client_method;
use crate::domain::{
    Product, ProductCreate, ProductPatch, RatingSummary, ReviewDraft, ReviewListing,
};
use crate::error::CatalogError;
use crate::messages::CatalogRequest;

/// Client for the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CatalogRequest::Shutdown)
            .await
            .map_err(|_| CatalogError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(CatalogClient => fn create_product(create: ProductCreate) -> String as CatalogRequest::CreateProduct, Error = CatalogError);
client_method!(CatalogClient => fn get_product(id: String) -> Option<Product> as CatalogRequest::GetProduct, Error = CatalogError);
client_method!(CatalogClient => fn list_products() -> Vec<Product> as CatalogRequest::ListProducts, Error = CatalogError);
client_method!(CatalogClient => fn update_product(id: String, patch: ProductPatch) -> Product as CatalogRequest::UpdateProduct, Error = CatalogError);
client_method!(CatalogClient => fn delete_product(id: String) -> () as CatalogRequest::DeleteProduct, Error = CatalogError);
client_method!(CatalogClient => fn upsert_review(product_id: String, draft: ReviewDraft) -> RatingSummary as CatalogRequest::UpsertReview, Error = CatalogError);
client_method!(CatalogClient => fn list_reviews(product_id: String) -> ReviewListing as CatalogRequest::ListReviews, Error = CatalogError);
client_method!(CatalogClient => fn delete_review(product_id: String, reviewer_id: String) -> RatingSummary as CatalogRequest::DeleteReview, Error = CatalogError);

// Test-only method for internal state inspection
#[cfg(test)]
client_method!(CatalogClient => fn get_product_count() -> usize as CatalogRequest::GetProductCount, Error = CatalogError);
