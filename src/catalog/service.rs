use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::CatalogClient;
use crate::domain::{
    Product, ProductCreate, ProductPatch, RatingSummary, ReviewDraft, ReviewListing,
};
use crate::error::CatalogError;
use crate::messages::{CatalogRequest, ServiceResponse};

/// Catalog actor. Owns products and, through them, every review. All
/// mutations flow through one mailbox, so a review mutation and its
/// aggregate recomputation run back to back with nothing interleaved:
/// a reader can never observe a stale summary and concurrent writers
/// cannot lose updates.
pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    products: HashMap<String, Product>,
    /// Insertion order of product ids, so listings are stable.
    order: Vec<String>,
    next_id: u64,
}

impl CatalogService {
    pub fn new(buffer_size: usize) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            products: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        };
        let client = CatalogClient::new(sender);
        (service, client)
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!("CatalogService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::CreateProduct { create, respond_to } => {
                    self.handle_create_product(create, respond_to);
                }
                CatalogRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                CatalogRequest::ListProducts { respond_to } => {
                    self.handle_list_products(respond_to);
                }
                CatalogRequest::UpdateProduct {
                    id,
                    patch,
                    respond_to,
                } => {
                    self.handle_update_product(id, patch, respond_to);
                }
                CatalogRequest::DeleteProduct { id, respond_to } => {
                    self.handle_delete_product(id, respond_to);
                }
                CatalogRequest::UpsertReview {
                    product_id,
                    draft,
                    respond_to,
                } => {
                    self.handle_upsert_review(product_id, draft, respond_to);
                }
                CatalogRequest::ListReviews {
                    product_id,
                    respond_to,
                } => {
                    self.handle_list_reviews(product_id, respond_to);
                }
                CatalogRequest::DeleteReview {
                    product_id,
                    reviewer_id,
                    respond_to,
                } => {
                    self.handle_delete_review(product_id, reviewer_id, respond_to);
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
                #[cfg(test)]
                CatalogRequest::GetProductCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.products.len()));
                }
            }
        }

        info!("CatalogService stopped");
    }

    #[instrument(fields(product_name = %create.name), skip(self, create, respond_to))]
    fn handle_create_product(
        &mut self,
        create: ProductCreate,
        respond_to: ServiceResponse<String, CatalogError>,
    ) {
        debug!("Processing create_product request");

        let id = format!("product_{}", self.next_id);
        self.next_id += 1;
        self.products.insert(id.clone(), Product::new(id.clone(), create));
        self.order.push(id.clone());

        info!(product_id = %id, "Product created");
        let _ = respond_to.send(Ok(id));
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get_product(
        &self,
        id: String,
        respond_to: ServiceResponse<Option<Product>, CatalogError>,
    ) {
        debug!("Processing get_product request");

        let product = self.products.get(&id).cloned();
        match &product {
            Some(product) => debug!(product_name = %product.name, "Product found"),
            None => debug!("Product not found"),
        }

        let _ = respond_to.send(Ok(product));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_products(&self, respond_to: ServiceResponse<Vec<Product>, CatalogError>) {
        debug!("Processing list_products request");

        let products: Vec<Product> = self
            .order
            .iter()
            .filter_map(|id| self.products.get(id).cloned())
            .collect();
        info!(product_count = products.len(), "Listed products");

        let _ = respond_to.send(Ok(products));
    }

    #[instrument(fields(product_id = %id), skip(self, patch, respond_to))]
    fn handle_update_product(
        &mut self,
        id: String,
        patch: ProductPatch,
        respond_to: ServiceResponse<Product, CatalogError>,
    ) {
        debug!("Processing update_product request");

        let result = match self.products.get_mut(&id) {
            Some(product) => {
                product.apply(patch);
                info!("Product updated");
                Ok(product.clone())
            }
            None => {
                error!("Product not found for update");
                Err(CatalogError::ProductNotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }

    /// Cascade delete: removing the product drops every review it owns.
    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_delete_product(&mut self, id: String, respond_to: ServiceResponse<(), CatalogError>) {
        debug!("Processing delete_product request");

        let result = match self.products.remove(&id) {
            Some(product) => {
                self.order.retain(|kept| kept != &id);
                info!(
                    review_count = product.reviews.len(),
                    "Product deleted with its reviews"
                );
                Ok(())
            }
            None => {
                debug!("Product not found for delete");
                Err(CatalogError::ProductNotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(
        fields(product_id = %product_id, reviewer_id = %draft.reviewer_id, rating = %draft.rating),
        skip(self, draft, respond_to)
    )]
    fn handle_upsert_review(
        &mut self,
        product_id: String,
        draft: ReviewDraft,
        respond_to: ServiceResponse<RatingSummary, CatalogError>,
    ) {
        debug!("Processing upsert_review request");

        let result = match self.products.get_mut(&product_id) {
            Some(product) => product.upsert_review(draft).inspect(|summary| {
                info!(
                    review_count = summary.count,
                    average = summary.average,
                    "Review stored and aggregate recomputed"
                );
            }),
            None => {
                error!("Product not found for review");
                Err(CatalogError::ProductNotFound(product_id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    fn handle_list_reviews(
        &self,
        product_id: String,
        respond_to: ServiceResponse<ReviewListing, CatalogError>,
    ) {
        debug!("Processing list_reviews request");

        let result = match self.products.get(&product_id) {
            Some(product) => Ok(ReviewListing {
                reviews: product.reviews.clone(),
                rating: product.rating,
            }),
            None => Err(CatalogError::ProductNotFound(product_id)),
        };

        let _ = respond_to.send(result);
    }

    #[instrument(
        fields(product_id = %product_id, reviewer_id = %reviewer_id),
        skip(self, respond_to)
    )]
    fn handle_delete_review(
        &mut self,
        product_id: String,
        reviewer_id: String,
        respond_to: ServiceResponse<RatingSummary, CatalogError>,
    ) {
        debug!("Processing delete_review request");

        let result = match self.products.get_mut(&product_id) {
            Some(product) => product.delete_review(&reviewer_id).inspect(|summary| {
                info!(
                    review_count = summary.count,
                    average = summary.average,
                    "Review deleted and aggregate recomputed"
                );
            }),
            None => {
                error!("Product not found for review deletion");
                Err(CatalogError::ProductNotFound(product_id))
            }
        };

        let _ = respond_to.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReviewDraft;

    fn sample_create(name: &str) -> ProductCreate {
        ProductCreate {
            name: name.into(),
            images: vec!["https://example.com/img.png".into()],
            price: 10.0,
            description: "desc".into(),
            category: "misc".into(),
            stock: 5,
        }
    }

    fn draft(reviewer: &str, rating: u8) -> ReviewDraft {
        ReviewDraft {
            reviewer_id: reviewer.into(),
            reviewer_name: reviewer.into(),
            rating,
            comment: String::new(),
        }
    }

    #[tokio::test]
    async fn product_deletion_cascades_reviews() {
        let (service, client) = CatalogService::new(10);
        tokio::spawn(service.run());

        let id = client.create_product(sample_create("Laptop")).await.unwrap();
        client.upsert_review(id.clone(), draft("user_1", 4)).await.unwrap();
        client.upsert_review(id.clone(), draft("user_2", 5)).await.unwrap();

        client.delete_product(id.clone()).await.unwrap();

        let err = client.list_reviews(id.clone()).await.unwrap_err();
        assert_eq!(err, CatalogError::ProductNotFound(id));
        assert_eq!(client.get_product_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn listings_preserve_insertion_order() {
        let (service, client) = CatalogService::new(10);
        tokio::spawn(service.run());

        let first = client.create_product(sample_create("A")).await.unwrap();
        let second = client.create_product(sample_create("B")).await.unwrap();
        client.delete_product(first).await.unwrap();
        let third = client.create_product(sample_create("C")).await.unwrap();

        let products = client.list_products().await.unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![second.as_str(), third.as_str()]);
    }

    #[tokio::test]
    async fn update_rejects_unknown_product() {
        let (service, client) = CatalogService::new(10);
        tokio::spawn(service.run());

        let err = client
            .update_product("product_404".into(), ProductPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::ProductNotFound("product_404".into()));
    }
}
