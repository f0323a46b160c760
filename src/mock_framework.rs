//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! In unit tests we often don't want to spin up a full actor just to test
//! the caller's side of a conversation. A mock client sends its messages
//! to a channel the test controls; the test inspects the requests arriving
//! there and responds deterministically (success, failure, delays).

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::clients::CatalogClient;
use crate::domain::{RatingSummary, ReviewDraft};
use crate::error::CatalogError;
use crate::messages::CatalogRequest;

/// Creates a mock resource client and a receiver for asserting requests.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Creates a mock catalog client and a receiver for asserting requests.
pub fn create_mock_catalog_client(
    buffer_size: usize,
) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

/// Helper to verify that the next resource message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    oneshot::Sender<Result<Option<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next catalog message is an UpsertReview request
pub async fn expect_upsert_review(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(
    String,
    ReviewDraft,
    oneshot::Sender<Result<RatingSummary, CatalogError>>,
)> {
    match receiver.recv().await {
        Some(CatalogRequest::UpsertReview {
            product_id,
            draft,
            respond_to,
        }) => Some((product_id, draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next catalog message is a DeleteReview request
pub async fn expect_delete_review(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(
    String,
    String,
    oneshot::Sender<Result<RatingSummary, CatalogError>>,
)> {
    match receiver.recv().await {
        Some(CatalogRequest::DeleteReview {
            product_id,
            reviewer_id,
            respond_to,
        }) => Some((product_id, reviewer_id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{DirectoryClient, ReviewClient};
    use crate::domain::{Principal, Role, User};
    use crate::reviews::ReviewService;

    #[tokio::test]
    async fn mock_directory_answers_a_get() {
        let (inner, mut rx) = create_mock_client::<User>(10);
        let directory = DirectoryClient::new(inner);

        let get_task = tokio::spawn(async move { directory.get_user("user_1".to_string()).await });

        let (id, responder) = expect_get(&mut rx).await.expect("Expected Get request");
        assert_eq!(id, "user_1");
        responder
            .send(Ok(Some(User {
                id: "user_1".into(),
                name: "Alice".into(),
                email: "alice@example.com".into(),
                roles: vec![Role::Customer],
            })))
            .unwrap();

        let user = get_task.await.unwrap().unwrap().unwrap();
        assert_eq!(user.name, "Alice");
    }

    fn customer(id: &str) -> Principal {
        Principal {
            user_id: id.to_string(),
            name: format!("User {id}"),
            roles: vec![Role::Customer],
        }
    }

    async fn review_service_with_mock_catalog(
    ) -> (ReviewClient, mpsc::Receiver<CatalogRequest>) {
        let (catalog_client, catalog_rx) = create_mock_catalog_client(10);
        let (service, client) = ReviewService::new(10, catalog_client);
        tokio::spawn(service.run());
        (client, catalog_rx)
    }

    #[tokio::test]
    async fn submit_review_delegates_a_draft_built_from_the_principal() {
        let (client, mut catalog_rx) = review_service_with_mock_catalog().await;

        let submit_task = tokio::spawn(async move {
            client
                .submit_review(
                    customer("user_1"),
                    "product_1".to_string(),
                    4,
                    "solid".to_string(),
                )
                .await
        });

        let (product_id, draft, responder) = expect_upsert_review(&mut catalog_rx)
            .await
            .expect("Expected UpsertReview");
        assert_eq!(product_id, "product_1");
        assert_eq!(draft.reviewer_id, "user_1");
        assert_eq!(draft.reviewer_name, "User user_1");
        assert_eq!(draft.rating, 4);
        responder
            .send(Ok(RatingSummary {
                count: 1,
                average: 4.0,
            }))
            .unwrap();

        let summary = submit_task.await.unwrap().unwrap();
        assert_eq!(summary.count, 1);
    }

    #[tokio::test]
    async fn invalid_rating_never_reaches_the_catalog() {
        let (client, mut catalog_rx) = review_service_with_mock_catalog().await;

        let err = client
            .submit_review(customer("user_1"), "product_1".to_string(), 0, String::new())
            .await;
        assert!(err.is_err());

        // No catalog request should have been sent.
        assert!(catalog_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn own_review_deletion_targets_the_caller() {
        let (client, mut catalog_rx) = review_service_with_mock_catalog().await;

        let delete_task = tokio::spawn(async move {
            client
                .delete_review(customer("user_1"), "product_1".to_string(), None)
                .await
        });

        let (product_id, reviewer_id, responder) = expect_delete_review(&mut catalog_rx)
            .await
            .expect("Expected DeleteReview");
        assert_eq!(product_id, "product_1");
        assert_eq!(reviewer_id, "user_1");
        responder.send(Ok(RatingSummary::default())).unwrap();

        assert!(delete_task.await.unwrap().is_ok());
    }
}
