//! Stored records and their JSON views.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use curation_core::{ChannelId, ChannelSetId, Entity, SecretTokenId, UserId};

/// A channel, as far as this service cares: a name and its editors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub description: String,
    pub editors: BTreeSet<UserId>,
}

impl Channel {
    pub fn new(id: ChannelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            editors: BTreeSet::new(),
        }
    }

    pub fn with_editor(mut self, user: UserId) -> Self {
        self.editors.insert(user);
        self
    }
}

impl Entity for Channel {
    type Id = ChannelId;

    fn id(&self) -> ChannelId {
        self.id
    }
}

/// Named collection of channels.
///
/// `channels` is the primary relation; the secret token's channel relation is
/// a mirror maintained by the store on every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSet {
    pub id: ChannelSetId,
    pub name: String,
    pub description: String,
    pub public: bool,
    pub channels: BTreeSet<ChannelId>,
    pub editors: BTreeSet<UserId>,
    /// Assigned by the store on insert.
    pub secret_token: Option<SecretTokenId>,
    /// 0 until first stored, +1 per committed write.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChannelSet {
    pub fn new(id: ChannelSetId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: String::new(),
            public: false,
            channels: BTreeSet::new(),
            editors: BTreeSet::new(),
            secret_token: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_editor(mut self, user: UserId) -> Self {
        self.editors.insert(user);
        self
    }

    pub fn with_channels(mut self, channels: impl IntoIterator<Item = ChannelId>) -> Self {
        self.channels.extend(channels);
        self
    }
}

impl Entity for ChannelSet {
    type Id = ChannelSetId;

    fn id(&self) -> ChannelSetId {
        self.id
    }
}

/// Access token handed out for a channel set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretToken {
    pub id: SecretTokenId,
    /// Human-typable token string, e.g. `"lusab-bavig"`.
    pub token: String,
    pub is_primary: bool,
    pub channels: BTreeSet<ChannelId>,
}

impl Entity for SecretToken {
    type Id = SecretTokenId;

    fn id(&self) -> SecretTokenId {
        self.id
    }
}

/// Consistent snapshot of a channel set and its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSetRecord {
    pub set: ChannelSet,
    pub token: SecretToken,
}

// -------------------------
// JSON views
// -------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SecretTokenView {
    pub token: String,
    pub channels: Vec<ChannelId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelSetView {
    pub id: ChannelSetId,
    pub name: String,
    pub description: String,
    pub public: bool,
    pub channels: Vec<ChannelId>,
    pub editors: Vec<UserId>,
    pub secret_token: SecretTokenView,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChannelSetRecord> for ChannelSetView {
    fn from(record: ChannelSetRecord) -> Self {
        let ChannelSetRecord { set, token } = record;
        Self {
            id: set.id,
            name: set.name,
            description: set.description,
            public: set.public,
            channels: set.channels.into_iter().collect(),
            editors: set.editors.into_iter().collect(),
            secret_token: SecretTokenView {
                token: token.token,
                channels: token.channels.into_iter().collect(),
            },
            version: set.version,
            created_at: set.created_at,
            updated_at: set.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelView {
    pub id: ChannelId,
    pub name: String,
    pub description: String,
}

impl From<Channel> for ChannelView {
    fn from(channel: Channel) -> Self {
        Self {
            id: channel.id,
            name: channel.name,
            description: channel.description,
        }
    }
}
