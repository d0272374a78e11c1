use serde::Serialize;
use serde_json::Value;

use crate::event::{ChangeEvent, ChangeKind};
use crate::handler::ApplyError;

/// Where in the event lifecycle a rejection happened.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStage {
    /// Received → Validated failed (shape, unknown type, bad id).
    Validation,
    /// Validated → Applied failed (permissions, references, missing target).
    Apply,
}

/// Structured per-event error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventError {
    pub stage: EventStage,
    pub code: &'static str,
    pub message: String,
}

impl EventError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            stage: EventStage::Validation,
            code: "invalid_event",
            message: message.into(),
        }
    }

    pub fn unknown_type(resource_type: &str) -> Self {
        Self {
            stage: EventStage::Validation,
            code: "unknown_type",
            message: format!("unknown resource type '{resource_type}'"),
        }
    }

    pub fn from_apply(stage: EventStage, err: &ApplyError) -> Self {
        Self {
            stage,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Result of one event in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventOutcome {
    Applied {
        index: usize,
        id: String,
        #[serde(rename = "type")]
        resource_type: String,
        kind: ChangeKind,
        /// Resulting state (create/update) or last state (delete of an existing
        /// resource); `null` for a delete that found nothing.
        resource: Option<Value>,
    },
    Rejected {
        index: usize,
        id: Option<String>,
        #[serde(rename = "type")]
        resource_type: Option<String>,
        kind: Option<ChangeKind>,
        error: EventError,
    },
}

impl EventOutcome {
    pub fn applied(index: usize, event: &ChangeEvent, resource: Option<Value>) -> Self {
        EventOutcome::Applied {
            index,
            id: event.id().to_string(),
            resource_type: event.resource_type().to_string(),
            kind: event.kind(),
            resource,
        }
    }

    pub fn rejected(index: usize, event: &ChangeEvent, error: EventError) -> Self {
        EventOutcome::Rejected {
            index,
            id: Some(event.id().to_string()),
            resource_type: Some(event.resource_type().to_string()),
            kind: Some(event.kind()),
            error,
        }
    }

    /// Rejection of an element that never became a `ChangeEvent`; echoes back
    /// whatever identifying fields can still be read from the raw value.
    pub fn malformed(index: usize, raw: &Value, error: EventError) -> Self {
        let field = |name: &str| raw.get(name).and_then(Value::as_str).map(str::to_string);
        EventOutcome::Rejected {
            index,
            id: field("id"),
            resource_type: field("type"),
            kind: field("kind").and_then(|k| k.parse().ok()),
            error,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, EventOutcome::Applied { .. })
    }

    pub fn index(&self) -> usize {
        match self {
            EventOutcome::Applied { index, .. } | EventOutcome::Rejected { index, .. } => *index,
        }
    }

    pub fn error(&self) -> Option<&EventError> {
        match self {
            EventOutcome::Applied { .. } => None,
            EventOutcome::Rejected { error, .. } => Some(error),
        }
    }
}

/// Aggregated per-event results of a sync call, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub results: Vec<EventOutcome>,
    pub applied: usize,
    pub rejected: usize,
}

impl BatchReport {
    pub fn new(results: Vec<EventOutcome>) -> Self {
        let applied = results.iter().filter(|r| r.is_applied()).count();
        let rejected = results.len() - applied;
        Self {
            results,
            applied,
            rejected,
        }
    }
}
