use serde_json::{Map, Value};
use thiserror::Error;

use curation_auth::{AuthzError, Principal};
use curation_core::DomainError;

/// Failure while applying a validated event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Authz(#[from] AuthzError),

    /// Storage or other infrastructure failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplyError {
    pub fn code(&self) -> &'static str {
        match self {
            ApplyError::Domain(e) => e.code(),
            ApplyError::Authz(_) => "forbidden",
            ApplyError::Internal(_) => "internal_error",
        }
    }
}

pub type ApplyResult<T> = Result<T, ApplyError>;

/// Applies change events for one resource type.
///
/// Handlers own the whole mutation of an event: permission checks, field
/// whitelisting and persistence. A rejected event must leave the store
/// untouched. Kinds a handler does not override are rejected as unsupported.
pub trait ResourceHandler: Send + Sync {
    /// Type tag this handler is registered under (e.g. "CHANNELSET").
    fn resource_type(&self) -> &'static str;

    /// Validation-stage id check.
    fn validate_id(&self, _id: &str) -> ApplyResult<()> {
        Ok(())
    }

    /// Create a resource with a client-assigned id; returns its new state.
    fn create(&self, _actor: &Principal, _id: &str, _payload: &Map<String, Value>) -> ApplyResult<Value> {
        Err(unsupported(self.resource_type(), "create"))
    }

    /// Apply whitelisted payload fields; returns the resulting state.
    fn update(&self, _actor: &Principal, _id: &str, _payload: &Map<String, Value>) -> ApplyResult<Value> {
        Err(unsupported(self.resource_type(), "update"))
    }

    /// Remove a resource. `Ok(None)` means there was nothing to delete.
    fn delete(&self, _actor: &Principal, _id: &str) -> ApplyResult<Option<Value>> {
        Err(unsupported(self.resource_type(), "delete"))
    }
}

fn unsupported(resource_type: &str, op: &str) -> ApplyError {
    DomainError::unsupported(format!("{resource_type} does not support {op}")).into()
}
