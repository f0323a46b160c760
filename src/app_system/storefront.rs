use tracing::{error, info, instrument};

use crate::actor_framework::{sequential_ids, ResourceActor};
use crate::catalog::CatalogService;
use crate::clients::{CatalogClient, DirectoryClient, ReviewClient};
use crate::domain::User;
use crate::reviews::ReviewService;

/// The main application system that wires all actors together.
///
/// Startup order: sub-actors first (directory, catalog), then the review
/// orchestrator with the catalog client injected.
pub struct Storefront {
    pub directory_client: DirectoryClient,
    pub catalog_client: CatalogClient,
    pub review_client: ReviewClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new()
    }
}

impl Storefront {
    #[instrument(name = "storefront_system")]
    pub fn new() -> Self {
        let mut handles = Vec::new();

        info!("Starting storefront system");

        let (directory_actor, directory_resource_client) =
            ResourceActor::<User>::new(100, sequential_ids("user"));
        let directory_client = DirectoryClient::new(directory_resource_client);
        handles.push(tokio::spawn(directory_actor.run()));

        let (catalog_service, catalog_client) = CatalogService::new(100);
        handles.push(tokio::spawn(catalog_service.run()));

        let (review_service, review_client) =
            ReviewService::new(100, catalog_client.clone());
        handles.push(tokio::spawn(review_service.run()));

        info!("Storefront system started successfully");

        Self {
            directory_client,
            catalog_client,
            review_client,
            handles,
        }
    }

    /// Gracefully shut the system down: orchestrator first, then the
    /// sub-actors it depends on. The directory actor stops when its last
    /// client is dropped.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront system");

        let _ = self.review_client.shutdown().await;
        let _ = self.catalog_client.shutdown().await;
        drop(self.directory_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(format!("Service shutdown error: {:?}", e));
            }
        }

        info!("Storefront system shutdown complete");
        Ok(())
    }
}
