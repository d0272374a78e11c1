use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use curation_auth::Permission;
use curation_core::ChannelId;
use curation_infra::{ChannelView, CurationStore};

use crate::app::errors;
use crate::app::routes::common::parse_path_id;
use crate::app::services::AppServices;
use crate::context::ActorContext;

pub fn router() -> Router {
    Router::new().route("/:id", get(get_channel))
}

pub async fn get_channel(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(res) = crate::authz::require_permissions(&actor, &[Permission::CHANNELS_READ]) {
        return res;
    }
    let id: ChannelId = match parse_path_id(&id, "channel") {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.channel(id) {
        Ok(Some(channel)) => Json(ChannelView::from(channel)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "channel not found"),
        Err(e) => errors::apply_error_to_response(e.into()),
    }
}
