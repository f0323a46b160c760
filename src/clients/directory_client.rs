use tracing::{debug, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::directory::UserAction;
use crate::domain::{Role, User, UserCreate, UserPatch};
use crate::error::DirectoryError;

/// Client for the user directory actor, wrapping the generic resource
/// client with domain naming and typed errors.
#[derive(Clone)]
pub struct DirectoryClient {
    inner: ResourceClient<User>,
}

fn map_err(err: FrameworkError) -> DirectoryError {
    match err {
        FrameworkError::NotFound(id) => DirectoryError::NotFound(id),
        FrameworkError::Rejected(msg) => DirectoryError::Rejected(msg),
        FrameworkError::ChannelClosed => {
            DirectoryError::ActorCommunicationError("Actor closed".to_string())
        }
    }
}

impl DirectoryClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: String) -> Result<Option<User>, DirectoryError> {
        debug!("Sending request");
        self.inner.get(id).await.map_err(map_err)
    }

    #[instrument(skip(self, user))]
    pub async fn create_user(&self, user: UserCreate) -> Result<String, DirectoryError> {
        debug!("Sending request");
        self.inner.create(user).await.map_err(map_err)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_user(&self, id: String, patch: UserPatch) -> Result<User, DirectoryError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(map_err)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: String) -> Result<(), DirectoryError> {
        debug!("Sending request");
        self.inner.delete(id).await.map_err(map_err)
    }

    /// Returns whether the role set changed.
    #[instrument(skip(self))]
    pub async fn grant_role(&self, id: String, role: Role) -> Result<bool, DirectoryError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, UserAction::GrantRole(role))
            .await
            .map_err(map_err)
    }

    /// Returns whether the role set changed. Takes effect on the next
    /// principal resolution: roles are never cached across requests.
    #[instrument(skip(self))]
    pub async fn revoke_role(&self, id: String, role: Role) -> Result<bool, DirectoryError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, UserAction::RevokeRole(role))
            .await
            .map_err(map_err)
    }
}
