//! Typed readers for whitelisted payload fields.
//!
//! A key that is absent yields `None`; a key that is present with the wrong
//! JSON type is a validation error. Keys nobody asks for are never looked at.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use curation_core::{ChannelId, DomainError, DomainResult};

pub fn string(payload: &Map<String, Value>, key: &str) -> DomainResult<Option<String>> {
    match payload.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DomainError::validation(format!("'{key}' must be a string"))),
    }
}

/// Like [`string`], but `null` clears the field to an empty string.
pub fn nullable_string(payload: &Map<String, Value>, key: &str) -> DomainResult<Option<String>> {
    match payload.get(key) {
        Some(Value::Null) => Ok(Some(String::new())),
        _ => string(payload, key),
    }
}

pub fn channel_ids(payload: &Map<String, Value>, key: &str) -> DomainResult<Option<BTreeSet<ChannelId>>> {
    let Some(value) = payload.get(key) else {
        return Ok(None);
    };
    let Value::Array(items) = value else {
        return Err(DomainError::validation(format!("'{key}' must be a list of channel ids")));
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s
                .parse::<ChannelId>()
                .map_err(|e| DomainError::validation(e.to_string())),
            _ => Err(DomainError::validation(format!("'{key}' must contain channel id strings"))),
        })
        .collect::<DomainResult<BTreeSet<_>>>()
        .map(Some)
}
