use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::{CatalogClient, ReviewClient};
use crate::domain::{
    rating_in_range, BulkRemoval, Principal, RatingSummary, ReviewDraft, ReviewListing, Role,
};
use crate::error::{CatalogError, ReviewError};
use crate::messages::{ReviewRequest, ServiceResponse};

/// Root orchestrator for review operations. Holds no review state of its
/// own: persistence and aggregation are delegated to the catalog actor,
/// which executes them as one critical section. This actor contributes
/// the stages in front of persistence: validation and the inline
/// owner-or-admin check for deletions.
pub struct ReviewService {
    receiver: mpsc::Receiver<ReviewRequest>,
    catalog_client: CatalogClient,
}

impl ReviewService {
    pub fn new(buffer_size: usize, catalog_client: CatalogClient) -> (Self, ReviewClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            catalog_client,
        };
        let client = ReviewClient::new(sender);
        (service, client)
    }

    #[instrument(name = "review_service", skip(self))]
    pub async fn run(mut self) {
        info!("ReviewService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ReviewRequest::SubmitReview {
                    principal,
                    product_id,
                    rating,
                    comment,
                    respond_to,
                } => {
                    self.handle_submit_review(principal, product_id, rating, comment, respond_to)
                        .await;
                }
                ReviewRequest::ListReviews {
                    product_id,
                    respond_to,
                } => {
                    self.handle_list_reviews(product_id, respond_to).await;
                }
                ReviewRequest::DeleteReview {
                    principal,
                    product_id,
                    target_reviewer,
                    respond_to,
                } => {
                    self.handle_delete_review(principal, product_id, target_reviewer, respond_to)
                        .await;
                }
                ReviewRequest::RemoveProducts { ids, respond_to } => {
                    self.handle_remove_products(ids, respond_to).await;
                }
                ReviewRequest::Shutdown => {
                    info!("ReviewService shutting down");
                    break;
                }
            }
        }

        info!("ReviewService stopped");
    }

    /// Create-or-update the caller's review, then return the recomputed
    /// aggregate. Validation happens before any persistence is touched.
    #[instrument(
        fields(user_id = %principal.user_id, product_id = %product_id, rating = %rating),
        skip(self, principal, comment, respond_to)
    )]
    async fn handle_submit_review(
        &mut self,
        principal: Principal,
        product_id: String,
        rating: u8,
        comment: String,
        respond_to: ServiceResponse<RatingSummary, ReviewError>,
    ) {
        debug!("Processing submit_review request");

        if !rating_in_range(rating) {
            error!("Rating out of range");
            let _ = respond_to.send(Err(ReviewError::InvalidRating(rating)));
            return;
        }

        let draft = ReviewDraft {
            reviewer_id: principal.user_id,
            reviewer_name: principal.name,
            rating,
            comment,
        };

        let result = self
            .catalog_client
            .upsert_review(product_id, draft)
            .await
            .map_err(ReviewError::from);

        match &result {
            Ok(summary) => info!(
                review_count = summary.count,
                average = summary.average,
                "Review submitted"
            ),
            Err(e) => error!(error = %e, "Review submission failed"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    async fn handle_list_reviews(
        &self,
        product_id: String,
        respond_to: ServiceResponse<ReviewListing, ReviewError>,
    ) {
        debug!("Processing list_reviews request");

        let result = self
            .catalog_client
            .list_reviews(product_id)
            .await
            .map_err(ReviewError::from);

        let _ = respond_to.send(result);
    }

    /// Delete a review. The caller may always delete their own review;
    /// deleting another reviewer's requires the admin role.
    #[instrument(
        fields(user_id = %principal.user_id, product_id = %product_id),
        skip(self, principal, respond_to)
    )]
    async fn handle_delete_review(
        &mut self,
        principal: Principal,
        product_id: String,
        target_reviewer: Option<String>,
        respond_to: ServiceResponse<RatingSummary, ReviewError>,
    ) {
        debug!("Processing delete_review request");

        let owner_id = target_reviewer.unwrap_or_else(|| principal.user_id.clone());

        if owner_id != principal.user_id && !principal.has_role(Role::Admin) {
            error!(owner_id = %owner_id, "Caller owns neither the review nor the admin role");
            let _ = respond_to.send(Err(ReviewError::NotReviewOwner {
                principal_id: principal.user_id,
                owner_id,
            }));
            return;
        }

        let result = self
            .catalog_client
            .delete_review(product_id, owner_id)
            .await
            .map_err(ReviewError::from);

        match &result {
            Ok(summary) => info!(
                review_count = summary.count,
                average = summary.average,
                "Review deleted"
            ),
            Err(e) => error!(error = %e, "Review deletion failed"),
        }

        let _ = respond_to.send(result);
    }

    /// Bulk product deletion. A missing identifier is skipped and
    /// reported; the rest of the batch still proceeds. Each deletion
    /// cascades that product's reviews.
    #[instrument(fields(batch_size = ids.len()), skip(self, ids, respond_to))]
    async fn handle_remove_products(
        &mut self,
        ids: Vec<String>,
        respond_to: ServiceResponse<BulkRemoval, ReviewError>,
    ) {
        debug!("Processing remove_products request");

        let mut outcome = BulkRemoval::default();
        for id in ids {
            match self.catalog_client.delete_product(id.clone()).await {
                Ok(()) => outcome.removed.push(id),
                Err(CatalogError::ProductNotFound(_)) => {
                    debug!(product_id = %id, "Skipping missing product in batch");
                    outcome.missing.push(id);
                }
                Err(e) => {
                    error!(error = %e, "Bulk deletion aborted");
                    let _ = respond_to.send(Err(ReviewError::from(e)));
                    return;
                }
            }
        }

        info!(
            removed = outcome.removed.len(),
            missing = outcome.missing.len(),
            "Bulk product deletion complete"
        );
        let _ = respond_to.send(Ok(outcome));
    }
}
