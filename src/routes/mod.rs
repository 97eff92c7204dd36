pub mod contact;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use crate::state::SharedState;

pub fn contact_routes() -> Router<SharedState> {
    Router::new().route(
        "/contact-handler",
        post(contact::submit).fallback(contact::method_not_allowed),
    )
}

pub fn health_routes() -> Router<SharedState> {
    Router::new().route("/health", get(health))
}

async fn health() -> &'static str {
    "ok"
}

/// Body of every contact handler response, success or failure.
#[derive(Debug, Serialize)]
pub struct ContactReply<'a> {
    pub success: bool,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Serialize a `ContactReply` as `application/json; charset=utf-8`.
pub fn json_reply(
    status: StatusCode,
    success: bool,
    message: &str,
    errors: Option<Vec<String>>,
) -> Response {
    let reply = ContactReply {
        success,
        message,
        errors,
    };

    match serde_json::to_string(&reply) {
        Ok(body) => (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize reply: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
