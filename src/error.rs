use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::routes::json_reply as reply;

pub const MSG_METHOD_NOT_ALLOWED: &str = "Method not allowed. Please use POST.";
pub const MSG_CONFIGURATION: &str = "Server configuration error. Please try again later.";
pub const MSG_VALIDATION: &str = "Please correct the following errors:";
pub const MSG_RATE_LIMITED: &str = "Please wait before submitting another message.";
pub const MSG_DELIVERY: &str =
    "Sorry, there was an error sending your message. Please try again later or contact us directly.";

#[derive(Debug)]
pub enum ContactError {
    MethodNotAllowed,
    Configuration(String),
    Validation(Vec<String>),
    RateLimited { retry_after: u64 },
    Delivery(String),
}

impl std::fmt::Display for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            ContactError::Configuration(msg) => write!(f, "Configuration Error: {msg}"),
            ContactError::Validation(errors) => write!(f, "Validation Failed: {}", errors.join(" ")),
            ContactError::RateLimited { retry_after } => {
                write!(f, "Rate Limited: retry after {retry_after}s")
            }
            ContactError::Delivery(msg) => write!(f, "Delivery Error: {msg}"),
        }
    }
}

impl std::error::Error for ContactError {}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        match self {
            ContactError::MethodNotAllowed => {
                let mut resp = reply(StatusCode::METHOD_NOT_ALLOWED, false, MSG_METHOD_NOT_ALLOWED, None);
                resp.headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static("POST"));
                resp
            }
            ContactError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                reply(StatusCode::INTERNAL_SERVER_ERROR, false, MSG_CONFIGURATION, None)
            }
            ContactError::Validation(errors) => {
                reply(StatusCode::BAD_REQUEST, false, MSG_VALIDATION, Some(errors))
            }
            ContactError::RateLimited { retry_after } => {
                let mut resp = reply(StatusCode::TOO_MANY_REQUESTS, false, MSG_RATE_LIMITED, None);
                resp.headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
                resp
            }
            ContactError::Delivery(msg) => {
                tracing::error!("Mail error: {msg}");
                reply(StatusCode::INTERNAL_SERVER_ERROR, false, MSG_DELIVERY, None)
            }
        }
    }
}
