use axum::{
    routing::{get, post},
    Router,
};

pub mod channels;
pub mod channelsets;
pub mod common;
pub mod sync;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/sync", post(sync::apply_sync))
        .nest("/channelsets", channelsets::router())
        .nest("/channels", channels::router())
}
