//! Role gate: a pure predicate applied after principal resolution.

use crate::domain::{Principal, Role};
use crate::error::AuthError;

/// Permit the operation iff the principal holds at least one of the
/// required roles. Stateless; the failure kind is distinct from
/// authentication failure so the boundary can map it to 403 rather
/// than 401.
pub fn authorize(principal: &Principal, required: &[Role]) -> Result<(), AuthError> {
    if required.iter().any(|role| principal.has_role(*role)) {
        return Ok(());
    }
    Err(AuthError::MissingRole(required.to_vec()))
}
