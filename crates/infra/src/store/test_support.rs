//! Store wrapper that injects interleavings a real concurrent caller could
//! produce, so handler code paths that depend on them run deterministically.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use curation_auth::EditPolicy;
use curation_core::{ChannelId, ChannelSetId, ExpectedVersion, SecretTokenId, UserId};

use super::{CurationStore, InMemoryCurationStore, StoreError};
use crate::model::{Channel, ChannelSet, ChannelSetRecord, SecretToken};

#[derive(Default)]
pub struct InterleavingStore {
    pub inner: InMemoryCurationStore,
    failing_writes: AtomicUsize,
    write_attempts: AtomicUsize,
    editor_after_read: Mutex<Option<UserId>>,
}

impl InterleavingStore {
    /// The next `n` calls to `write_channel_set` lose the version race.
    pub fn fail_next_writes(&self, n: usize) {
        self.failing_writes.store(n, Ordering::SeqCst);
    }

    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    /// Right after the next `channel` read, another writer adds `user` as an
    /// editor of that channel.
    pub fn add_editor_after_next_read(&self, user: UserId) {
        *self.editor_after_read.lock().unwrap() = Some(user);
    }
}

impl EditPolicy for InterleavingStore {
    fn can_edit_channel(&self, user: UserId, channel: ChannelId) -> bool {
        self.inner.can_edit_channel(user, channel)
    }

    fn can_edit_channel_set(&self, user: UserId, channel_set: ChannelSetId) -> bool {
        self.inner.can_edit_channel_set(user, channel_set)
    }
}

impl CurationStore for InterleavingStore {
    fn channel(&self, id: ChannelId) -> Result<Option<Channel>, StoreError> {
        let snapshot = self.inner.channel(id)?;
        if let Some(user) = self.editor_after_read.lock().unwrap().take() {
            if let Some(current) = self.inner.channel(id)? {
                self.inner.upsert_channel(current.with_editor(user))?;
            }
        }
        Ok(snapshot)
    }

    fn upsert_channel(&self, channel: Channel) -> Result<(), StoreError> {
        self.inner.upsert_channel(channel)
    }

    fn update_channel_metadata(
        &self,
        id: ChannelId,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Channel>, StoreError> {
        self.inner.update_channel_metadata(id, name, description)
    }

    fn channel_set(&self, id: ChannelSetId) -> Result<Option<ChannelSetRecord>, StoreError> {
        self.inner.channel_set(id)
    }

    fn list_channel_sets(&self, editor: Option<UserId>) -> Result<Vec<ChannelSetRecord>, StoreError> {
        self.inner.list_channel_sets(editor)
    }

    fn insert_channel_set(&self, set: ChannelSet) -> Result<ChannelSetRecord, StoreError> {
        self.inner.insert_channel_set(set)
    }

    fn write_channel_set(
        &self,
        set: ChannelSet,
        expected: ExpectedVersion,
    ) -> Result<ChannelSetRecord, StoreError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        let lost_race = self
            .failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if lost_race {
            return Err(StoreError::Concurrency(format!(
                "channel set {} was modified concurrently",
                set.id
            )));
        }
        self.inner.write_channel_set(set, expected)
    }

    fn delete_channel_set(&self, id: ChannelSetId) -> Result<Option<ChannelSetRecord>, StoreError> {
        self.inner.delete_channel_set(id)
    }

    fn add_channel_set_editor(&self, id: ChannelSetId, user: UserId) -> Result<ChannelSetRecord, StoreError> {
        self.inner.add_channel_set_editor(id, user)
    }

    fn secret_token(&self, id: SecretTokenId) -> Result<Option<SecretToken>, StoreError> {
        self.inner.secret_token(id)
    }
}
