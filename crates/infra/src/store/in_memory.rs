use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use chrono::Utc;

use curation_auth::EditPolicy;
use curation_core::{ChannelId, ChannelSetId, Entity, ExpectedVersion, SecretTokenId, UserId};

use super::{CurationStore, StoreError};
use crate::model::{Channel, ChannelSet, ChannelSetRecord, SecretToken};
use crate::token;

#[derive(Debug, Default)]
struct State {
    channels: HashMap<ChannelId, Channel>,
    channel_sets: HashMap<ChannelSetId, ChannelSet>,
    tokens: HashMap<SecretTokenId, SecretToken>,
}

impl State {
    fn record(&self, set: &ChannelSet) -> Result<ChannelSetRecord, StoreError> {
        let token = set
            .secret_token
            .and_then(|id| self.tokens.get(&id))
            .ok_or_else(|| StoreError::Integrity(format!("channel set {} has no secret token", set.id)))?;
        Ok(ChannelSetRecord {
            set: set.clone(),
            token: token.clone(),
        })
    }

    fn unique_token_string(&self) -> String {
        loop {
            let candidate = token::generate();
            if !self.tokens.values().any(|t| t.token == candidate) {
                return candidate;
            }
        }
    }

    /// The one write path for channel sets: stores the set, issues a token if
    /// it has none, and mirrors `set.channels` onto the token.
    fn commit(&mut self, mut set: ChannelSet) -> ChannelSetRecord {
        let token_id = set
            .secret_token
            .filter(|id| self.tokens.contains_key(id))
            .unwrap_or_else(SecretTokenId::new);

        let fresh = if self.tokens.contains_key(&token_id) {
            None
        } else {
            Some(self.unique_token_string())
        };
        let token = self.tokens.entry(token_id).or_insert_with(|| SecretToken {
            id: token_id,
            token: fresh.unwrap_or_default(),
            is_primary: true,
            channels: BTreeSet::new(),
        });
        token.channels.clone_from(&set.channels);
        let token = token.clone();

        set.secret_token = Some(token_id);
        set.version += 1;
        set.updated_at = Utc::now();
        self.channel_sets.insert(set.id(), set.clone());

        ChannelSetRecord { set, token }
    }
}

/// In-memory store for tests/dev.
///
/// One `RwLock` guards all relations; each write method holds the write guard
/// for its whole mutation, so writes to the same channel set serialize.
#[derive(Debug)]
pub struct InMemoryCurationStore {
    inner: RwLock<State>,
}

impl InMemoryCurationStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State::default()),
        }
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for InMemoryCurationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditPolicy for InMemoryCurationStore {
    fn can_edit_channel(&self, user: UserId, channel: ChannelId) -> bool {
        self.read()
            .map(|state| {
                state
                    .channels
                    .get(&channel)
                    .is_some_and(|c| c.editors.contains(&user))
            })
            .unwrap_or(false)
    }

    fn can_edit_channel_set(&self, user: UserId, channel_set: ChannelSetId) -> bool {
        self.read()
            .map(|state| {
                state
                    .channel_sets
                    .get(&channel_set)
                    .is_some_and(|s| s.editors.contains(&user))
            })
            .unwrap_or(false)
    }
}

impl CurationStore for InMemoryCurationStore {
    fn channel(&self, id: ChannelId) -> Result<Option<Channel>, StoreError> {
        Ok(self.read()?.channels.get(&id).cloned())
    }

    fn upsert_channel(&self, channel: Channel) -> Result<(), StoreError> {
        self.write()?.channels.insert(channel.id(), channel);
        Ok(())
    }

    fn update_channel_metadata(
        &self,
        id: ChannelId,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Channel>, StoreError> {
        let mut state = self.write()?;
        let Some(channel) = state.channels.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = name {
            channel.name = name;
        }
        if let Some(description) = description {
            channel.description = description;
        }
        Ok(Some(channel.clone()))
    }

    fn channel_set(&self, id: ChannelSetId) -> Result<Option<ChannelSetRecord>, StoreError> {
        let state = self.read()?;
        state.channel_sets.get(&id).map(|set| state.record(set)).transpose()
    }

    fn list_channel_sets(&self, editor: Option<UserId>) -> Result<Vec<ChannelSetRecord>, StoreError> {
        let state = self.read()?;
        let mut records = state
            .channel_sets
            .values()
            .filter(|set| editor.is_none_or(|user| set.editors.contains(&user)))
            .map(|set| state.record(set))
            .collect::<Result<Vec<_>, _>>()?;
        records.sort_by(|a, b| a.set.created_at.cmp(&b.set.created_at).then(a.set.id.cmp(&b.set.id)));
        Ok(records)
    }

    fn insert_channel_set(&self, mut set: ChannelSet) -> Result<ChannelSetRecord, StoreError> {
        let mut state = self.write()?;
        if state.channel_sets.contains_key(&set.id()) {
            return Err(StoreError::AlreadyExists(set.id()));
        }
        set.secret_token = None;
        set.version = 0;
        set.created_at = Utc::now();
        Ok(state.commit(set))
    }

    fn write_channel_set(
        &self,
        set: ChannelSet,
        expected: ExpectedVersion,
    ) -> Result<ChannelSetRecord, StoreError> {
        let mut state = self.write()?;
        let current = state
            .channel_sets
            .get(&set.id())
            .ok_or(StoreError::NotFound(set.id()))?;

        expected
            .check(current.version)
            .map_err(|e| StoreError::Concurrency(e.to_string()))?;

        // Identity and bookkeeping fields are owned by the store.
        let mut set = set;
        set.secret_token = current.secret_token;
        set.version = current.version;
        set.created_at = current.created_at;
        Ok(state.commit(set))
    }

    fn delete_channel_set(&self, id: ChannelSetId) -> Result<Option<ChannelSetRecord>, StoreError> {
        let mut state = self.write()?;
        let Some(set) = state.channel_sets.remove(&id) else {
            return Ok(None);
        };
        let token = set
            .secret_token
            .and_then(|token_id| state.tokens.remove(&token_id))
            .ok_or_else(|| StoreError::Integrity(format!("channel set {id} had no secret token")))?;
        Ok(Some(ChannelSetRecord { set, token }))
    }

    fn add_channel_set_editor(&self, id: ChannelSetId, user: UserId) -> Result<ChannelSetRecord, StoreError> {
        let mut state = self.write()?;
        let mut set = state
            .channel_sets
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;
        set.editors.insert(user);
        Ok(state.commit(set))
    }

    fn secret_token(&self, id: SecretTokenId) -> Result<Option<SecretToken>, StoreError> {
        Ok(self.read()?.tokens.get(&id).cloned())
    }
}
