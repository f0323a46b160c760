//! Generic resource actor: a single task owning a keyed store, serving
//! typed CRUD requests plus entity-specific actions over an mpsc mailbox.
//! Because the mailbox has one consumer, every request against the store
//! runs as an uninterrupted critical section.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Errors produced by the framework itself or by entity hooks.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Rejected(String),
    #[error("Actor channel closed")]
    ChannelClosed,
}

/// Trait a domain entity implements to be managed by [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Construct the full entity from a generated id and the payload.
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, FrameworkError>;

    fn on_update(&mut self, patch: Self::Patch) -> Result<(), FrameworkError>;

    fn on_delete(&self) -> Result<(), FrameworkError> {
        Ok(())
    }

    /// Handle a domain-specific action against the entity's state.
    fn handle_action(&mut self, action: Self::Action)
        -> Result<Self::ActionResult, FrameworkError>;
}

pub type Respond<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Respond<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Respond<Option<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Respond<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Respond<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Respond<T::ActionResult>,
    },
}

/// Generic actor server. Stops when the last client is dropped.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    pub async fn run(mut self) {
        info!("Resource actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create {
                    payload,
                    respond_to,
                } => {
                    let id = (self.next_id_fn)();
                    match T::from_create(id.clone(), payload) {
                        Ok(item) => {
                            self.store.insert(id.clone(), item);
                            debug!(id = %id, "Item created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    patch,
                    respond_to,
                } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        match item.on_update(patch) {
                            Ok(()) => {
                                let _ = respond_to.send(Ok(item.clone()));
                            }
                            Err(e) => {
                                let _ = respond_to.send(Err(e));
                            }
                        }
                    } else {
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete() {
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                        self.store.remove(&id);
                        debug!(id = %id, "Item deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item.handle_action(action);
                        let _ = respond_to.send(result);
                    } else {
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!("Resource actor stopped");
    }
}

/// Cloneable handle for sending requests to a [`ResourceActor`].
#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        make: impl FnOnce(Respond<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| FrameworkError::ChannelClosed)?;
        response.await.map_err(|_| FrameworkError::ChannelClosed)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create {
            payload,
            respond_to,
        })
        .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            patch,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

/// Helper for wiring counter-backed id generators, shared by the system
/// coordinator and tests.
pub fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    use std::sync::atomic::{AtomicU64, Ordering};
    let counter = Arc::new(AtomicU64::new(1));
    move || {
        let id = counter.fetch_add(1, Ordering::SeqCst);
        format!("{}_{}", prefix, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::UserAction;
    use crate::domain::{Role, User, UserCreate, UserPatch};

    #[tokio::test]
    async fn resource_actor_crud_and_actions() {
        let (actor, client) = ResourceActor::<User>::new(10, sequential_ids("user"));
        tokio::spawn(actor.run());

        let id = client
            .create(UserCreate {
                name: "Alice".into(),
                email: "alice@example.com".into(),
                roles: vec![Role::Customer],
            })
            .await
            .unwrap();
        assert_eq!(id, "user_1");

        let changed = client
            .perform_action(id.clone(), UserAction::GrantRole(Role::Admin))
            .await
            .unwrap();
        assert!(changed);

        let user = client.get(id.clone()).await.unwrap().unwrap();
        assert!(user.roles.contains(&Role::Admin));

        // Granting again is a no-op
        let changed_again = client
            .perform_action(id.clone(), UserAction::GrantRole(Role::Admin))
            .await
            .unwrap();
        assert!(!changed_again);

        let updated = client
            .update(
                id.clone(),
                UserPatch {
                    name: Some("Alice B".into()),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Alice B");

        client.delete(id.clone()).await.unwrap();
        assert_eq!(
            client.delete(id.clone()).await,
            Err(FrameworkError::NotFound("user_1".into()))
        );
    }
}
