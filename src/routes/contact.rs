use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;

use crate::error::ContactError;
use crate::state::SharedState;
use crate::submission::{metadata, parser, pipeline, Outcome};

pub const MSG_SENT: &str =
    "Thank you! Your message has been sent successfully. We'll get back to you soon.";
pub const MSG_DROPPED: &str = "Thank you! Your message has been sent successfully.";

pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ContactError> {
    let Some(mailer) = state.mailer.clone() else {
        return Err(ContactError::Configuration(
            "no mail transport configured".to_string(),
        ));
    };

    let fields = parser::parse(&headers, body).await.unwrap_or_else(|e| {
        tracing::debug!("Unreadable contact form body: {e}");
        parser::FormFields::new()
    });

    let client_ip = metadata::client_ip(&headers, addr.ip(), &state.config.trusted_proxies);

    let outcome = pipeline::run(&state, mailer.as_ref(), client_ip, fields).await?;

    let message = match outcome {
        Outcome::Sent => MSG_SENT,
        Outcome::Dropped => MSG_DROPPED,
    };

    Ok(super::json_reply(StatusCode::OK, true, message, None))
}

pub async fn method_not_allowed() -> ContactError {
    ContactError::MethodNotAllowed
}
