use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "channelsets.write").
/// A special wildcard permission `"*"` grants everything, including editing
/// channels and channel sets the principal is not an explicit editor of.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const WILDCARD: Permission = Permission(Cow::Borrowed("*"));
    pub const CHANNELSETS_READ: Permission = Permission(Cow::Borrowed("channelsets.read"));
    pub const CHANNELSETS_WRITE: Permission = Permission(Cow::Borrowed("channelsets.write"));
    pub const CHANNELS_READ: Permission = Permission(Cow::Borrowed("channels.read"));
    pub const SYNC_APPLY: Permission = Permission(Cow::Borrowed("sync.apply"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
