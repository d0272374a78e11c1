//! Builders for the change-event wire representation.
//!
//! Used by clients and tests to assemble sync request bodies.

use serde_json::{json, Value};

use crate::event::ChangeKind;

pub fn generate_create_event(id: impl ToString, resource_type: &str, payload: Value) -> Value {
    json!({
        "id": id.to_string(),
        "type": resource_type,
        "kind": ChangeKind::Create,
        "payload": payload,
    })
}

pub fn generate_update_event(id: impl ToString, resource_type: &str, payload: Value) -> Value {
    json!({
        "id": id.to_string(),
        "type": resource_type,
        "kind": ChangeKind::Update,
        "payload": payload,
    })
}

pub fn generate_delete_event(id: impl ToString, resource_type: &str) -> Value {
    json!({
        "id": id.to_string(),
        "type": resource_type,
        "kind": ChangeKind::Delete,
    })
}
