//! Resource storage.
//!
//! The store owns the editor relations, so it is also the [`EditPolicy`] the
//! handlers consult.

pub mod in_memory;

#[cfg(test)]
pub(crate) mod test_support;

use curation_auth::EditPolicy;
use curation_core::{ChannelId, ChannelSetId, DomainError, ExpectedVersion, SecretTokenId, UserId};
use curation_sync::ApplyError;

use crate::model::{Channel, ChannelSet, ChannelSetRecord, SecretToken};

pub use in_memory::InMemoryCurationStore;

/// Store error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("channel set not found: {0}")]
    NotFound(ChannelSetId),
    #[error("channel set already exists: {0}")]
    AlreadyExists(ChannelSetId),
    #[error("concurrent modification: {0}")]
    Concurrency(String),
    #[error("integrity error: {0}")]
    Integrity(String),
    #[error("store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for ApplyError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(_) => ApplyError::Domain(DomainError::NotFound),
            StoreError::AlreadyExists(id) => {
                ApplyError::Domain(DomainError::conflict(format!("channel set {id} already exists")))
            }
            StoreError::Concurrency(msg) => ApplyError::Domain(DomainError::Conflict(msg)),
            StoreError::Integrity(msg) => ApplyError::Internal(msg),
            StoreError::Poisoned => ApplyError::Internal("store lock poisoned".to_string()),
        }
    }
}

/// Storage for channels, channel sets and their secret tokens.
///
/// Every write of a channel set goes through [`CurationStore::insert_channel_set`]
/// or [`CurationStore::write_channel_set`]; both re-mirror the set's channels
/// onto its token before releasing the write, so readers never observe the two
/// relations out of sync.
pub trait CurationStore: EditPolicy + Send + Sync {
    fn channel(&self, id: ChannelId) -> Result<Option<Channel>, StoreError>;

    fn upsert_channel(&self, channel: Channel) -> Result<(), StoreError>;

    /// Overwrite a channel's name and/or description in place, leaving every
    /// other field (editors included) as currently stored. `None` if the
    /// channel does not exist.
    fn update_channel_metadata(
        &self,
        id: ChannelId,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Channel>, StoreError>;

    fn channel_set(&self, id: ChannelSetId) -> Result<Option<ChannelSetRecord>, StoreError>;

    /// Channel sets `editor` edits, or all of them for `None`.
    fn list_channel_sets(&self, editor: Option<UserId>) -> Result<Vec<ChannelSetRecord>, StoreError>;

    /// Store a new channel set and issue its primary token.
    fn insert_channel_set(&self, set: ChannelSet) -> Result<ChannelSetRecord, StoreError>;

    /// Replace an existing channel set if it is still at `expected`.
    fn write_channel_set(
        &self,
        set: ChannelSet,
        expected: ExpectedVersion,
    ) -> Result<ChannelSetRecord, StoreError>;

    /// Remove a channel set together with its token. `None` if it did not exist.
    fn delete_channel_set(&self, id: ChannelSetId) -> Result<Option<ChannelSetRecord>, StoreError>;

    fn add_channel_set_editor(&self, id: ChannelSetId, user: UserId) -> Result<ChannelSetRecord, StoreError>;

    fn secret_token(&self, id: SecretTokenId) -> Result<Option<SecretToken>, StoreError>;
}
