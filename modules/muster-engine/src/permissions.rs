//! The permission gate: a flat admin/moderator allowlist persisted in the
//! registry. Admins implicitly pass moderator checks.

use muster_common::{MusterError, Registry, Result, Role, UserId};

/// Does the user satisfy the required role?
pub fn is_privileged(registry: &Registry, user: &UserId, required: Role) -> bool {
    match required {
        Role::Admin => registry.admins.contains(user),
        Role::Moderator => registry.admins.contains(user) || registry.moderators.contains(user),
    }
}

/// Grant a role to a user. Only admins may grant. Granting a role the
/// target already holds (or a lower one than they hold) is an error, so
/// the caller can surface it instead of silently doing nothing.
pub fn grant_role(
    registry: &mut Registry,
    actor: &UserId,
    target: &UserId,
    role: Role,
) -> Result<()> {
    if !registry.admins.contains(actor) {
        return Err(MusterError::Unauthorized(Role::Admin));
    }

    match role {
        Role::Admin => {
            if registry.admins.contains(target) {
                return Err(MusterError::AlreadyGranted {
                    target: target.clone(),
                    role,
                });
            }
            // Promotion out of the moderator set keeps the sets disjoint.
            registry.moderators.remove(target);
            registry.admins.insert(target.clone());
        }
        Role::Moderator => {
            if registry.admins.contains(target) || registry.moderators.contains(target) {
                return Err(MusterError::AlreadyGranted {
                    target: target.clone(),
                    role,
                });
            }
            registry.moderators.insert(target.clone());
        }
    }

    Ok(())
}
