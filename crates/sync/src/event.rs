use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::outcome::EventError;

/// Operation requested by a change event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Create => "create",
            ChangeKind::Update => "update",
            ChangeKind::Delete => "delete",
        }
    }
}

impl core::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(ChangeKind::Create),
            "update" => Ok(ChangeKind::Update),
            "delete" => Ok(ChangeKind::Delete),
            other => Err(format!("unknown change kind '{other}'")),
        }
    }
}

/// A single requested change, after structural validation.
///
/// Immutable once constructed. The payload is always an object; it is empty
/// when the client sent none and ignored for deletes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeEvent {
    id: String,
    #[serde(rename = "type")]
    resource_type: String,
    kind: ChangeKind,
    payload: Map<String, Value>,
}

impl ChangeEvent {
    pub fn new(
        id: impl Into<String>,
        resource_type: impl Into<String>,
        kind: ChangeKind,
        payload: Map<String, Value>,
    ) -> Self {
        let payload = match kind {
            ChangeKind::Delete => Map::new(),
            _ => payload,
        };
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
            kind,
            payload,
        }
    }

    /// Structural validation of one element of a sync batch.
    ///
    /// Checks shape only: `id`, `type` and `kind` are strings, `kind` is a
    /// known operation and `payload`, when present, is an object. Whether the
    /// type is registered is decided by the applier.
    pub fn from_value(raw: Value) -> Result<Self, EventError> {
        let Value::Object(mut obj) = raw else {
            return Err(EventError::invalid("change event must be a JSON object"));
        };

        let id = take_string(&mut obj, "id")?;
        let resource_type = take_string(&mut obj, "type")?;
        let kind: ChangeKind = take_string(&mut obj, "kind")?
            .parse()
            .map_err(EventError::invalid)?;

        let payload = match obj.remove("payload") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) if kind == ChangeKind::Delete => Map::new(),
            Some(_) => return Err(EventError::invalid("'payload' must be a JSON object")),
        };

        if id.trim().is_empty() {
            return Err(EventError::invalid("'id' must not be empty"));
        }

        Ok(Self::new(id, resource_type, kind, payload))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}

fn take_string(obj: &mut Map<String, Value>, field: &str) -> Result<String, EventError> {
    match obj.remove(field) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(EventError::invalid(format!("'{field}' must be a string"))),
        None => Err(EventError::invalid(format!("missing '{field}'"))),
    }
}
