use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use curation_auth::Permission;
use curation_core::{ChannelSetId, UserId};
use curation_infra::ChannelSetView;

use crate::app::routes::common::{json_body, parse_path_id};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz::require_permissions;
use crate::context::ActorContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_channel_sets).post(create_channel_set))
        .route(
            "/:id",
            get(get_channel_set)
                .patch(update_channel_set)
                .delete(delete_channel_set),
        )
        .route("/:id/editors", post(add_editor))
}

pub async fn list_channel_sets(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
) -> axum::response::Response {
    if let Err(res) = require_permissions(&actor, &[Permission::CHANNELSETS_READ]) {
        return res;
    }

    match services.channel_sets.list_channel_sets(actor.principal()) {
        Ok(records) => Json(dto::ChannelSetList {
            items: records.into_iter().map(ChannelSetView::from).collect(),
        })
        .into_response(),
        Err(e) => errors::apply_error_to_response(e),
    }
}

pub async fn create_channel_set(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    if let Err(res) = require_permissions(&actor, &[Permission::CHANNELSETS_WRITE]) {
        return res;
    }

    let (id, changes) = match json_body(body).and_then(dto::create_channel_set_request) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.channel_sets.create_channel_set(actor.principal(), id, changes) {
        Ok(record) => (StatusCode::CREATED, Json(ChannelSetView::from(record))).into_response(),
        Err(e) => errors::apply_error_to_response(e),
    }
}

/// Sets the actor does not edit answer 404, like missing ones.
pub async fn get_channel_set(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(res) = require_permissions(&actor, &[Permission::CHANNELSETS_READ]) {
        return res;
    }
    let id: ChannelSetId = match parse_path_id(&id, "channel set") {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.channel_sets.get_channel_set(actor.principal(), id) {
        Ok(Some(record)) => Json(ChannelSetView::from(record)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "channel set not found"),
        Err(e) => errors::apply_error_to_response(e),
    }
}

pub async fn update_channel_set(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    if let Err(res) = require_permissions(&actor, &[Permission::CHANNELSETS_WRITE]) {
        return res;
    }
    let id: ChannelSetId = match parse_path_id(&id, "channel set") {
        Ok(v) => v,
        Err(res) => return res,
    };
    let changes = match json_body(body).and_then(dto::update_channel_set_request) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.channel_sets.update_channel_set(actor.principal(), id, changes) {
        Ok(record) => Json(ChannelSetView::from(record)).into_response(),
        Err(e) => errors::apply_error_to_response(e),
    }
}

/// Deleting an id that does not exist still answers 204.
pub async fn delete_channel_set(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(res) = require_permissions(&actor, &[Permission::CHANNELSETS_WRITE]) {
        return res;
    }
    let id: ChannelSetId = match parse_path_id(&id, "channel set") {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.channel_sets.delete_channel_set(actor.principal(), id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::apply_error_to_response(e),
    }
}

pub async fn add_editor(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
    body: Result<Json<dto::AddEditorRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(res) = require_permissions(&actor, &[Permission::CHANNELSETS_WRITE]) {
        return res;
    }
    let body = match json_body(body) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let id: ChannelSetId = match parse_path_id(&id, "channel set") {
        Ok(v) => v,
        Err(res) => return res,
    };
    let user: UserId = match parse_path_id(&body.user_id, "user") {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.channel_sets.add_editor(actor.principal(), id, user) {
        Ok(record) => Json(ChannelSetView::from(record)).into_response(),
        Err(e) => errors::apply_error_to_response(e),
    }
}
