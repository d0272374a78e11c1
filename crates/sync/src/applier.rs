use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use curation_auth::Principal;

use crate::event::{ChangeEvent, ChangeKind};
use crate::handler::ResourceHandler;
use crate::outcome::{BatchReport, EventError, EventOutcome, EventStage};

/// Resource-type tag → handler.
#[derive(Clone, Default)]
pub struct SyncRegistry {
    handlers: HashMap<&'static str, Arc<dyn ResourceHandler>>,
}

impl SyncRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its own type tag. A later registration for the
    /// same tag replaces the earlier one.
    pub fn register(mut self, handler: Arc<dyn ResourceHandler>) -> Self {
        self.handlers.insert(handler.resource_type(), handler);
        self
    }

    pub fn get(&self, resource_type: &str) -> Option<&Arc<dyn ResourceHandler>> {
        self.handlers.get(resource_type)
    }

    pub fn resource_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.handlers.keys().copied().collect();
        types.sort_unstable();
        types
    }
}

impl core::fmt::Debug for SyncRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SyncRegistry")
            .field("resource_types", &self.resource_types())
            .finish()
    }
}

/// Applies a batch of change events, one at a time, in order.
///
/// Each event commits (or is rejected) independently: a rejection never rolls
/// back earlier events and never stops later ones.
#[derive(Debug, Clone)]
pub struct BatchApplier {
    registry: SyncRegistry,
}

impl BatchApplier {
    pub fn new(registry: SyncRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SyncRegistry {
        &self.registry
    }

    pub fn apply_batch(&self, actor: &Principal, events: Vec<Value>) -> BatchReport {
        let span = tracing::info_span!("sync_batch", user_id = %actor.user_id, size = events.len());
        let _guard = span.enter();

        let outcomes = events
            .into_iter()
            .enumerate()
            .map(|(index, raw)| self.apply_one(actor, index, raw))
            .collect();

        let report = BatchReport::new(outcomes);
        tracing::info!(applied = report.applied, rejected = report.rejected, "sync batch processed");
        report
    }

    fn apply_one(&self, actor: &Principal, index: usize, raw: Value) -> EventOutcome {
        let (event, handler) = match self.validate(index, raw) {
            Ok(validated) => validated,
            Err(outcome) => return outcome,
        };

        let result = match event.kind() {
            ChangeKind::Create => handler.create(actor, event.id(), event.payload()).map(Some),
            ChangeKind::Update => handler.update(actor, event.id(), event.payload()).map(Some),
            ChangeKind::Delete => handler.delete(actor, event.id()),
        };

        match result {
            Ok(resource) => {
                tracing::debug!(
                    index,
                    id = event.id(),
                    resource_type = event.resource_type(),
                    kind = %event.kind(),
                    "change applied"
                );
                EventOutcome::applied(index, &event, resource)
            }
            Err(err) => {
                tracing::warn!(
                    index,
                    id = event.id(),
                    resource_type = event.resource_type(),
                    kind = %event.kind(),
                    error = %err,
                    "change rejected"
                );
                EventOutcome::rejected(index, &event, EventError::from_apply(EventStage::Apply, &err))
            }
        }
    }

    /// Received → Validated.
    fn validate(
        &self,
        index: usize,
        raw: Value,
    ) -> Result<(ChangeEvent, Arc<dyn ResourceHandler>), EventOutcome> {
        let event = match ChangeEvent::from_value(raw.clone()) {
            Ok(event) => event,
            Err(error) => {
                tracing::warn!(index, error = %error.message, "malformed change event");
                return Err(EventOutcome::malformed(index, &raw, error));
            }
        };

        let Some(handler) = self.registry.get(event.resource_type()) else {
            let error = EventError::unknown_type(event.resource_type());
            tracing::warn!(index, resource_type = event.resource_type(), "unknown resource type");
            return Err(EventOutcome::rejected(index, &event, error));
        };

        if let Err(err) = handler.validate_id(event.id()) {
            let error = EventError::from_apply(EventStage::Validation, &err);
            return Err(EventOutcome::rejected(index, &event, error));
        }

        Ok((event, Arc::clone(handler)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use serde_json::{json, Map};

    use super::*;
    use crate::constructors::{generate_create_event, generate_delete_event, generate_update_event};
    use crate::handler::{ApplyError, ApplyResult};
    use curation_auth::Role;
    use curation_core::{DomainError, UserId};

    /// Toy handler: string ids, `name` is the only writable field, ids starting
    /// with "locked" are not editable.
    #[derive(Default)]
    struct NotesHandler {
        notes: Mutex<BTreeMap<String, String>>,
    }

    impl NotesHandler {
        fn check(&self, id: &str) -> ApplyResult<()> {
            if id.starts_with("locked") {
                return Err(DomainError::forbidden("locked note").into());
            }
            Ok(())
        }
    }

    impl ResourceHandler for NotesHandler {
        fn resource_type(&self) -> &'static str {
            "NOTE"
        }

        fn validate_id(&self, id: &str) -> ApplyResult<()> {
            if id.contains(' ') {
                return Err(DomainError::invalid_id("spaces").into());
            }
            Ok(())
        }

        fn create(&self, _actor: &Principal, id: &str, payload: &Map<String, Value>) -> ApplyResult<Value> {
            self.check(id)?;
            let name = payload.get("name").and_then(Value::as_str).unwrap_or_default().to_string();
            self.notes.lock().unwrap().insert(id.to_string(), name.clone());
            Ok(json!({"id": id, "name": name}))
        }

        fn update(&self, _actor: &Principal, id: &str, payload: &Map<String, Value>) -> ApplyResult<Value> {
            self.check(id)?;
            let mut notes = self.notes.lock().unwrap();
            let name = notes.get_mut(id).ok_or(ApplyError::Domain(DomainError::NotFound))?;
            if let Some(new_name) = payload.get("name").and_then(Value::as_str) {
                *name = new_name.to_string();
            }
            Ok(json!({"id": id, "name": name.clone()}))
        }
    }

    fn actor() -> Principal {
        Principal::new(UserId::new(), vec![Role::new("editor")])
    }

    fn applier(handler: Arc<NotesHandler>) -> BatchApplier {
        BatchApplier::new(SyncRegistry::new().register(handler))
    }

    #[test]
    fn applies_events_in_order() {
        let handler = Arc::new(NotesHandler::default());
        let applier = applier(handler.clone());

        let report = applier.apply_batch(
            &actor(),
            vec![
                generate_create_event("a", "NOTE", json!({"name": "first"})),
                generate_update_event("a", "NOTE", json!({"name": "second", "color": "red"})),
            ],
        );

        assert_eq!(report.applied, 2);
        assert_eq!(report.rejected, 0);
        assert_eq!(handler.notes.lock().unwrap()["a"], "second");
    }

    #[test]
    fn rejection_does_not_block_siblings() {
        let handler = Arc::new(NotesHandler::default());
        let applier = applier(handler.clone());

        let report = applier.apply_batch(
            &actor(),
            vec![
                generate_create_event("locked-1", "NOTE", json!({"name": "x"})),
                generate_create_event("b", "NOTE", json!({"name": "y"})),
            ],
        );

        assert_eq!(report.applied, 1);
        let err = report.results[0].error().unwrap();
        assert_eq!(err.code, "forbidden");
        assert_eq!(err.stage, EventStage::Apply);
        assert!(report.results[1].is_applied());
        assert!(handler.notes.lock().unwrap().contains_key("b"));
    }

    #[test]
    fn validation_failures_are_per_event() {
        let applier = applier(Arc::new(NotesHandler::default()));

        let report = applier.apply_batch(
            &actor(),
            vec![
                json!(42),
                generate_create_event("a", "WIDGET", json!({})),
                generate_create_event("has space", "NOTE", json!({})),
                generate_create_event("ok", "NOTE", json!({})),
            ],
        );

        let codes: Vec<_> = report.results.iter().map(|r| r.error().map(|e| e.code)).collect();
        assert_eq!(
            codes,
            vec![Some("invalid_event"), Some("unknown_type"), Some("invalid_id"), None]
        );
        assert!(report.results[..3]
            .iter()
            .all(|r| r.error().unwrap().stage == EventStage::Validation));
        assert_eq!(report.results.iter().map(EventOutcome::index).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn unsupported_kinds_are_rejected() {
        let applier = applier(Arc::new(NotesHandler::default()));
        let report = applier.apply_batch(&actor(), vec![generate_delete_event("a", "NOTE")]);

        assert_eq!(report.results[0].error().unwrap().code, "unsupported_operation");
    }

    #[test]
    fn malformed_outcome_echoes_identifying_fields() {
        let applier = applier(Arc::new(NotesHandler::default()));
        let report = applier.apply_batch(
            &actor(),
            vec![json!({"id": "a", "type": "NOTE", "kind": "update", "payload": 5})],
        );

        let body = serde_json::to_value(&report).unwrap();
        assert_eq!(body["results"][0]["status"], "rejected");
        assert_eq!(body["results"][0]["id"], "a");
        assert_eq!(body["results"][0]["kind"], "update");
        assert_eq!(body["results"][0]["error"]["stage"], "validation");
    }

    #[test]
    fn empty_batch_is_fine() {
        let applier = applier(Arc::new(NotesHandler::default()));
        let report = applier.apply_batch(&actor(), Vec::new());
        assert!(report.results.is_empty());
        assert_eq!(report.applied, 0);
    }
}
