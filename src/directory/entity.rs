use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Role, User, UserCreate, UserPatch};

/// Role administration actions on a directory record. The result reports
/// whether the role set actually changed.
#[derive(Debug, Clone)]
pub enum UserAction {
    GrantRole(Role),
    RevokeRole(Role),
}

impl Entity for User {
    type Id = String;
    type CreatePayload = UserCreate;
    type Patch = UserPatch;
    type Action = UserAction;
    type ActionResult = bool;

    fn from_create(id: String, payload: UserCreate) -> Result<Self, FrameworkError> {
        if payload.email.is_empty() {
            return Err(FrameworkError::Rejected("Email required".to_string()));
        }
        Ok(Self {
            id,
            name: payload.name,
            email: payload.email,
            roles: payload.roles,
        })
    }

    fn on_update(&mut self, patch: UserPatch) -> Result<(), FrameworkError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            if email.is_empty() {
                return Err(FrameworkError::Rejected("Email required".to_string()));
            }
            self.email = email;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: UserAction) -> Result<bool, FrameworkError> {
        match action {
            UserAction::GrantRole(role) => {
                if self.roles.contains(&role) {
                    Ok(false)
                } else {
                    self.roles.push(role);
                    Ok(true)
                }
            }
            UserAction::RevokeRole(role) => {
                let before = self.roles.len();
                self.roles.retain(|held| *held != role);
                Ok(self.roles.len() != before)
            }
        }
    }
}
