use curation_core::UserId;

use crate::{permissions_for_roles, JwtClaims, Permission, Role};

/// A fully resolved principal for authorization decisions.
///
/// Construction is decoupled from transport: the API derives it from claims,
/// tests build it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

impl Principal {
    pub fn new(user_id: UserId, roles: Vec<Role>) -> Self {
        let permissions = permissions_for_roles(&roles);
        Self {
            user_id,
            roles,
            permissions,
        }
    }

    pub fn from_claims(claims: &JwtClaims) -> Self {
        Self::new(claims.sub, claims.roles.clone())
    }

    pub fn has_permission(&self, required: &Permission) -> bool {
        self.permissions
            .iter()
            .any(|p| p.is_wildcard() || p == required)
    }

    /// Wildcard holders may edit every channel and channel set.
    pub fn is_global_editor(&self) -> bool {
        self.permissions.iter().any(Permission::is_wildcard)
    }
}
