use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use curation_auth::AuthzError;
use curation_core::DomainError;
use curation_sync::ApplyError;

/// Map a handler failure on a CRUD route to an HTTP response.
///
/// Lacking edit rights on a referenced channel is a problem with the request
/// body (400); lacking rights on the channel set itself is 403.
pub fn apply_error_to_response(err: ApplyError) -> axum::response::Response {
    match err {
        ApplyError::Domain(e) => domain_error_to_response(e),
        ApplyError::Authz(e @ AuthzError::ChannelNotEditable(_)) => {
            json_error(StatusCode::BAD_REQUEST, "channel_not_editable", e.to_string())
        }
        ApplyError::Authz(e) => json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()),
        ApplyError::Internal(msg) => {
            tracing::error!(error = %msg, "internal error while applying change");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let code = err.code();
    match err {
        DomainError::Validation(msg) | DomainError::InvalidId(msg) | DomainError::Unsupported(msg) => {
            json_error(StatusCode::BAD_REQUEST, code, msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, code, "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, code, msg),
        DomainError::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, code, msg),
    }
}

/// Body that failed JSON extraction (bad syntax, wrong content type).
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    let status = rejection.status();
    let code = if status == StatusCode::UNSUPPORTED_MEDIA_TYPE {
        "unsupported_media_type"
    } else {
        "invalid_json"
    };
    json_error(status, code, rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
