use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use curation_core::ChannelSetId;
use curation_infra::{ChannelSetChanges, ChannelSetView};

use crate::app::errors::{domain_error_to_response, json_error};
use crate::context::ActorContext;

#[derive(Debug, Serialize)]
pub struct ChannelSetList {
    pub items: Vec<ChannelSetView>,
}

#[derive(Debug, Deserialize)]
pub struct AddEditorRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub user_id: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl From<&ActorContext> for WhoAmI {
    fn from(actor: &ActorContext) -> Self {
        Self {
            user_id: actor.user_id().to_string(),
            roles: actor.roles().iter().map(|r| r.as_str().to_string()).collect(),
            permissions: actor
                .principal()
                .permissions
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        }
    }
}

/// Require a JSON object body.
pub fn object_body(body: Value) -> Result<Map<String, Value>, Response> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "request body must be a JSON object",
        )),
    }
}

/// Split a create body into its client-assigned id and the writable fields.
pub fn create_channel_set_request(body: Value) -> Result<(ChannelSetId, ChannelSetChanges), Response> {
    let map = object_body(body)?;

    let id = match map.get("id") {
        Some(Value::String(raw)) => raw.parse::<ChannelSetId>().map_err(domain_error_to_response)?,
        _ => {
            return Err(json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "'id' is required and must be a string",
            ));
        }
    };

    let changes = ChannelSetChanges::from_payload(&map).map_err(domain_error_to_response)?;
    Ok((id, changes))
}

pub fn update_channel_set_request(body: Value) -> Result<ChannelSetChanges, Response> {
    let map = object_body(body)?;
    ChannelSetChanges::from_payload(&map).map_err(domain_error_to_response)
}
