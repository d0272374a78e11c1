//! API-side route permission guard.
//!
//! Route permissions are checked here, before any handler touches the store.
//! Object-level checks (channel and channel-set editorship) happen inside the
//! handlers.

use axum::http::StatusCode;
use axum::response::Response;

use curation_auth::{authorize, Permission};

use crate::app::errors::json_error;
use crate::context::ActorContext;

/// Require every permission in `required`, or produce a 403 response.
pub fn require_permissions(actor: &ActorContext, required: &[Permission]) -> Result<(), Response> {
    for perm in required {
        if let Err(e) = authorize(actor.principal(), perm) {
            tracing::debug!(user_id = %actor.user_id(), permission = %perm, "route permission denied");
            return Err(json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()));
        }
    }
    Ok(())
}
