//! Channel sets: the CRUD operations shared by the REST routes and the sync
//! endpoint.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::{Map, Value};

use curation_auth::{require_channel_set_edit, require_channels_edit, Principal};
use curation_core::{ChannelId, ChannelSetId, DomainError, DomainResult, ExpectedVersion, UserId};
use curation_sync::{ApplyError, ApplyResult, ResourceHandler};

use super::fields;
use crate::model::{ChannelSet, ChannelSetRecord, ChannelSetView};
use crate::store::{CurationStore, StoreError};

pub const CHANNELSET: &str = "CHANNELSET";

/// Attempts per update before a version conflict is reported to the caller.
const MAX_WRITE_ATTEMPTS: usize = 3;

/// Writable subset of a channel-set payload.
///
/// Only `name`, `description` and `channels` are read from the payload; every
/// other key (including read-only ones like `public` or `secret_token`) is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSetChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub channels: Option<BTreeSet<ChannelId>>,
}

impl ChannelSetChanges {
    pub const WRITABLE_FIELDS: &'static [&'static str] = &["name", "description", "channels"];

    pub fn from_payload(payload: &Map<String, Value>) -> DomainResult<Self> {
        Ok(Self {
            name: fields::string(payload, "name")?,
            description: fields::nullable_string(payload, "description")?,
            channels: fields::channel_ids(payload, "channels")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.channels.is_none()
    }

    fn apply_to(self, set: &mut ChannelSet) {
        if let Some(name) = self.name {
            set.name = name;
        }
        if let Some(description) = self.description {
            set.description = description;
        }
        if let Some(channels) = self.channels {
            set.channels = channels;
        }
    }
}

pub struct ChannelSetHandler<S> {
    store: Arc<S>,
}

impl<S> ChannelSetHandler<S>
where
    S: CurationStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create_channel_set(
        &self,
        actor: &Principal,
        id: ChannelSetId,
        changes: ChannelSetChanges,
    ) -> ApplyResult<ChannelSetRecord> {
        if self.store.channel_set(id)?.is_some() {
            return Err(StoreError::AlreadyExists(id).into());
        }

        if let Some(channels) = &changes.channels {
            self.ensure_channels_exist(channels)?;
            require_channels_edit(self.store.as_ref(), actor, channels)?;
        }

        let mut set = ChannelSet::new(id, "").with_editor(actor.user_id);
        changes.apply_to(&mut set);
        let record = self.store.insert_channel_set(set)?;

        tracing::info!(
            channel_set_id = %id,
            user_id = %actor.user_id,
            channels = record.set.channels.len(),
            "channel set created"
        );
        Ok(record)
    }

    pub fn update_channel_set(
        &self,
        actor: &Principal,
        id: ChannelSetId,
        changes: ChannelSetChanges,
    ) -> ApplyResult<ChannelSetRecord> {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let current = self
                .store
                .channel_set(id)?
                .ok_or(ApplyError::Domain(DomainError::NotFound))?;
            require_channel_set_edit(self.store.as_ref(), actor, id)?;

            if changes.is_empty() {
                return Ok(current);
            }

            // Dropping channels only needs set editorship; adding needs edit
            // rights on each added channel.
            if let Some(channels) = &changes.channels {
                let added: BTreeSet<ChannelId> =
                    channels.difference(&current.set.channels).copied().collect();
                self.ensure_channels_exist(&added)?;
                require_channels_edit(self.store.as_ref(), actor, &added)?;
            }

            let expected = ExpectedVersion::Exact(current.set.version);
            let mut set = current.set;
            changes.clone().apply_to(&mut set);

            match self.store.write_channel_set(set, expected) {
                Ok(record) => {
                    tracing::info!(
                        channel_set_id = %id,
                        user_id = %actor.user_id,
                        version = record.set.version,
                        "channel set updated"
                    );
                    return Ok(record);
                }
                Err(StoreError::Concurrency(msg)) if attempt < MAX_WRITE_ATTEMPTS => {
                    tracing::debug!(channel_set_id = %id, attempt, %msg, "retrying channel set update");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Deleting a set that does not exist is a no-op (`Ok(None)`).
    pub fn delete_channel_set(&self, actor: &Principal, id: ChannelSetId) -> ApplyResult<Option<ChannelSetRecord>> {
        if self.store.channel_set(id)?.is_none() {
            tracing::debug!(channel_set_id = %id, "delete of missing channel set ignored");
            return Ok(None);
        }
        require_channel_set_edit(self.store.as_ref(), actor, id)?;

        let removed = self.store.delete_channel_set(id)?;
        tracing::info!(channel_set_id = %id, user_id = %actor.user_id, "channel set deleted");
        Ok(removed)
    }

    /// Share a channel set with another user. Only current editors may do so.
    pub fn add_editor(&self, actor: &Principal, id: ChannelSetId, user: UserId) -> ApplyResult<ChannelSetRecord> {
        if self.store.channel_set(id)?.is_none() {
            return Err(DomainError::NotFound.into());
        }
        require_channel_set_edit(self.store.as_ref(), actor, id)?;

        let record = self.store.add_channel_set_editor(id, user)?;
        tracing::info!(channel_set_id = %id, user_id = %actor.user_id, editor = %user, "channel set editor added");
        Ok(record)
    }

    /// A set the actor does not edit is reported as absent.
    pub fn get_channel_set(&self, actor: &Principal, id: ChannelSetId) -> ApplyResult<Option<ChannelSetRecord>> {
        let Some(record) = self.store.channel_set(id)? else {
            return Ok(None);
        };
        if actor.is_global_editor() || record.set.editors.contains(&actor.user_id) {
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    pub fn list_channel_sets(&self, actor: &Principal) -> ApplyResult<Vec<ChannelSetRecord>> {
        let editor = (!actor.is_global_editor()).then_some(actor.user_id);
        Ok(self.store.list_channel_sets(editor)?)
    }

    fn ensure_channels_exist(&self, channels: &BTreeSet<ChannelId>) -> ApplyResult<()> {
        for channel in channels {
            if self.store.channel(*channel)?.is_none() {
                return Err(DomainError::validation(format!("channel {channel} does not exist")).into());
            }
        }
        Ok(())
    }
}

fn parse_id(id: &str) -> ApplyResult<ChannelSetId> {
    Ok(id.parse::<ChannelSetId>()?)
}

fn to_json(record: ChannelSetRecord) -> ApplyResult<Value> {
    serde_json::to_value(ChannelSetView::from(record)).map_err(|e| ApplyError::Internal(e.to_string()))
}

impl<S> ResourceHandler for ChannelSetHandler<S>
where
    S: CurationStore + 'static,
{
    fn resource_type(&self) -> &'static str {
        CHANNELSET
    }

    fn validate_id(&self, id: &str) -> ApplyResult<()> {
        parse_id(id).map(|_| ())
    }

    fn create(&self, actor: &Principal, id: &str, payload: &Map<String, Value>) -> ApplyResult<Value> {
        let id = parse_id(id)?;
        let changes = ChannelSetChanges::from_payload(payload)?;
        to_json(self.create_channel_set(actor, id, changes)?)
    }

    fn update(&self, actor: &Principal, id: &str, payload: &Map<String, Value>) -> ApplyResult<Value> {
        let id = parse_id(id)?;
        let changes = ChannelSetChanges::from_payload(payload)?;
        to_json(self.update_channel_set(actor, id, changes)?)
    }

    fn delete(&self, actor: &Principal, id: &str) -> ApplyResult<Option<Value>> {
        let id = parse_id(id)?;
        self.delete_channel_set(actor, id)?.map(to_json).transpose()
    }
}
