//! Channel metadata edits through sync. Channels themselves are owned by the
//! surrounding system, so only updates are accepted.

use std::sync::Arc;

use serde_json::{Map, Value};

use curation_auth::{require_channels_edit, Principal};
use curation_core::{ChannelId, DomainError};
use curation_sync::{ApplyError, ApplyResult, ResourceHandler};

use super::fields;
use crate::model::{Channel, ChannelView};
use crate::store::CurationStore;

pub const CHANNEL: &str = "CHANNEL";

pub struct ChannelHandler<S> {
    store: Arc<S>,
}

impl<S> ChannelHandler<S>
where
    S: CurationStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> ResourceHandler for ChannelHandler<S>
where
    S: CurationStore + 'static,
{
    fn resource_type(&self) -> &'static str {
        CHANNEL
    }

    fn validate_id(&self, id: &str) -> ApplyResult<()> {
        id.parse::<ChannelId>()?;
        Ok(())
    }

    fn update(&self, actor: &Principal, id: &str, payload: &Map<String, Value>) -> ApplyResult<Value> {
        let id = id.parse::<ChannelId>()?;
        let name = fields::string(payload, "name")?;
        let description = fields::nullable_string(payload, "description")?;

        let current = self
            .store
            .channel(id)?
            .ok_or(ApplyError::Domain(DomainError::NotFound))?;
        require_channels_edit(self.store.as_ref(), actor, [&id])?;

        if name.is_none() && description.is_none() {
            return to_json(current);
        }

        // Field-level write under the store lock; editors stay as stored.
        let channel = self
            .store
            .update_channel_metadata(id, name, description)?
            .ok_or(ApplyError::Domain(DomainError::NotFound))?;
        tracing::info!(channel_id = %id, user_id = %actor.user_id, "channel updated");

        to_json(channel)
    }
}

fn to_json(channel: Channel) -> ApplyResult<Value> {
    serde_json::to_value(ChannelView::from(channel)).map_err(|e| ApplyError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::test_support::InterleavingStore;
    use crate::store::InMemoryCurationStore;
    use curation_auth::Role;
    use curation_core::UserId;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn editor_can_rename_channel() {
        let store = InMemoryCurationStore::arc();
        let actor = Principal::new(UserId::new(), vec![Role::new("editor")]);
        let id = ChannelId::new();
        store.upsert_channel(Channel::new(id, "old").with_editor(actor.user_id)).unwrap();

        let handler = ChannelHandler::new(store.clone());
        let view = handler
            .update(&actor, &id.to_string(), &payload(json!({"name": "new", "editors": []})))
            .unwrap();

        assert_eq!(view["name"], "new");
        let stored = store.channel(id).unwrap().unwrap();
        assert_eq!(stored.name, "new");
        assert!(stored.editors.contains(&actor.user_id));
    }

    #[test]
    fn non_editor_is_rejected() {
        let store = InMemoryCurationStore::arc();
        let actor = Principal::new(UserId::new(), vec![Role::new("editor")]);
        let id = ChannelId::new();
        store.upsert_channel(Channel::new(id, "old")).unwrap();

        let err = ChannelHandler::new(store.clone())
            .update(&actor, &id.to_string(), &payload(json!({"name": "new"})))
            .unwrap_err();

        assert_eq!(err.code(), "forbidden");
        assert_eq!(store.channel(id).unwrap().unwrap().name, "old");
    }

    #[test]
    fn create_and_delete_are_unsupported() {
        let store = InMemoryCurationStore::arc();
        let actor = Principal::new(UserId::new(), vec![Role::new("admin")]);
        let handler = ChannelHandler::new(store);
        let id = ChannelId::new().to_string();

        assert_eq!(
            handler.create(&actor, &id, &Map::new()).unwrap_err().code(),
            "unsupported_operation"
        );
        assert_eq!(handler.delete(&actor, &id).unwrap_err().code(), "unsupported_operation");
    }

    #[test]
    fn missing_channel_is_not_found() {
        let store = InMemoryCurationStore::arc();
        let actor = Principal::new(UserId::new(), vec![Role::new("admin")]);
        let err = ChannelHandler::new(store)
            .update(&actor, &ChannelId::new().to_string(), &Map::new())
            .unwrap_err();
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn rename_keeps_editors_added_after_the_read() {
        let store = Arc::new(InterleavingStore::default());
        let actor = Principal::new(UserId::new(), vec![Role::new("editor")]);
        let late_editor = UserId::new();
        let id = ChannelId::new();
        store
            .inner
            .upsert_channel(Channel::new(id, "old").with_editor(actor.user_id))
            .unwrap();
        store.add_editor_after_next_read(late_editor);

        ChannelHandler::new(store.clone())
            .update(&actor, &id.to_string(), &payload(json!({"name": "new"})))
            .unwrap();

        let stored = store.inner.channel(id).unwrap().unwrap();
        assert_eq!(stored.name, "new");
        assert!(stored.editors.contains(&actor.user_id));
        assert!(stored.editors.contains(&late_editor));
    }
}
