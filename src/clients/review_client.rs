use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::client_method;
use crate::domain::{BulkRemoval, Principal, RatingSummary, ReviewListing};
use crate::error::ReviewError;
use crate::messages::ReviewRequest;

/// Client for the review orchestrator actor.
#[derive(Clone)]
pub struct ReviewClient {
    sender: mpsc::Sender<ReviewRequest>,
}

impl ReviewClient {
    pub fn new(sender: mpsc::Sender<ReviewRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ReviewError> {
        debug!("Sending shutdown request");
        self.sender
            .send(ReviewRequest::Shutdown)
            .await
            .map_err(|_| ReviewError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(ReviewClient => fn submit_review(principal: Principal, product_id: String, rating: u8, comment: String) -> RatingSummary as ReviewRequest::SubmitReview, Error = ReviewError);
client_method!(ReviewClient => fn list_reviews(product_id: String) -> ReviewListing as ReviewRequest::ListReviews, Error = ReviewError);
client_method!(ReviewClient => fn delete_review(principal: Principal, product_id: String, target_reviewer: Option<String>) -> RatingSummary as ReviewRequest::DeleteReview, Error = ReviewError);
client_method!(ReviewClient => fn remove_products(ids: Vec<String>) -> BulkRemoval as ReviewRequest::RemoveProducts, Error = ReviewError);
