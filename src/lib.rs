pub mod config;
pub mod email;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod state;
pub mod submission;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::{Mailer, SmtpMailer};
use crate::rate_limit::CooldownStore;
use crate::state::{AppState, SharedState};

/// Build the SMTP mailer from config, or `None` if it is missing or unusable.
pub fn smtp_mailer(config: &Config) -> Option<Arc<dyn Mailer>> {
    let Some(smtp) = config.smtp.as_ref() else {
        tracing::warn!("SMTP not configured, contact submissions will be refused");
        return None;
    };

    match SmtpMailer::new(smtp) {
        Ok(mailer) => {
            tracing::info!("SMTP configured for {}:{}", smtp.host, smtp.port);
            Some(Arc::new(mailer))
        }
        Err(e) => {
            tracing::error!("SMTP not available: {e}");
            None
        }
    }
}

pub fn build_app(
    config: Config,
    mailer: Option<Arc<dyn Mailer>>,
    cooldowns: Arc<dyn CooldownStore>,
) -> Router {
    let max_body_size = config.max_body_size;
    let static_dir = config.static_dir.clone();

    let state: SharedState = Arc::new(AppState {
        config,
        mailer,
        cooldowns,
    });

    let mut router = Router::new()
        .merge(routes::contact_routes())
        .merge(routes::health_routes());

    if let Some(dir) = static_dir {
        tracing::info!("Serving static site from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-xss-protection"),
            HeaderValue::from_static("1; mode=block"),
        ))
        .with_state(state)
}
