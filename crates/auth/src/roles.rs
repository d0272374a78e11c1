use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Role identifier used for RBAC.
///
/// Roles are opaque strings carried in the JWT; [`permissions_for_roles`]
/// is the single place that maps them to permissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role→permission mapping.
///
/// - `admin`: wildcard (global editor).
/// - `editor`: read/write channel sets, read channels, apply sync batches.
/// - anything else: nothing.
pub fn permissions_for_roles(roles: &[Role]) -> Vec<Permission> {
    if roles.iter().any(|r| r.as_str() == "admin") {
        return vec![Permission::WILDCARD];
    }

    let mut perms = Vec::new();
    if roles.iter().any(|r| r.as_str() == "editor") {
        perms.extend([
            Permission::CHANNELSETS_READ,
            Permission::CHANNELSETS_WRITE,
            Permission::CHANNELS_READ,
            Permission::SYNC_APPLY,
        ]);
    }
    perms
}
