//! Identity context resolution and role gating.

pub mod gate;
pub mod token;

use tracing::{debug, instrument};

use crate::clients::DirectoryClient;
use crate::domain::Principal;
use crate::error::AuthError;

/// Resolve a request's credential into a [`Principal`].
///
/// The credential only authenticates the caller; the role set is looked
/// up live in the directory at resolution time, never trusted from the
/// token payload, so a revoked role is gone on the very next request.
/// Read-only: no state is touched.
#[instrument(skip_all)]
pub async fn resolve(
    secret: &str,
    credential: Option<&str>,
    directory: &DirectoryClient,
) -> Result<Principal, AuthError> {
    let token = credential.ok_or(AuthError::MissingCredential)?;
    let user_id = token::verify(secret, token)?;

    let user = directory
        .get_user(user_id)
        .await
        .map_err(|e| AuthError::DirectoryUnavailable(e.to_string()))?
        .ok_or_else(|| AuthError::InvalidCredential("unknown user".to_string()))?;

    debug!(user_id = %user.id, "Principal resolved");
    Ok(Principal {
        user_id: user.id,
        name: user.name,
        roles: user.roles,
    })
}
