use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use curation_auth::Permission;

use crate::app::errors;
use crate::app::routes::common::json_body;
use crate::app::services::AppServices;
use crate::context::ActorContext;

/// `POST /sync`: apply a batch of change events.
///
/// The response is 200 whenever the body is a list, however many events were
/// rejected; per-event outcomes are in `results`.
pub async fn apply_sync(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    if let Err(res) = crate::authz::require_permissions(&actor, &[Permission::SYNC_APPLY]) {
        return res;
    }
    let body = match json_body(body) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let Value::Array(events) = body else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_batch",
            "sync body must be a JSON array of change events",
        );
    };

    let report = services.applier.apply_batch(actor.principal(), events);
    (StatusCode::OK, Json(report)).into_response()
}
