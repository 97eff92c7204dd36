use std::net::IpAddr;

use chrono::Utc;

use crate::email::templates::{self, ContactFields};
use crate::email::{ContactMessage, Mailer};
use crate::error::ContactError;
use crate::rate_limit;
use crate::state::SharedState;

use super::fields::{self, Submission};
use super::honeypot;
use super::parser::FormFields;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The message was delivered and the client's cooldown started.
    Sent,
    /// Honeypot tripped. Nothing was sent, but the caller is told it was.
    Dropped,
}

pub async fn run(
    state: &SharedState,
    mailer: &dyn Mailer,
    client_ip: IpAddr,
    raw_fields: FormFields,
) -> Result<Outcome, ContactError> {
    let submission = Submission::from_fields(&raw_fields);

    if honeypot::is_spam(&raw_fields) {
        tracing::debug!("Honeypot filled, dropping submission from {client_ip}");
        return Ok(Outcome::Dropped);
    }

    let errors = fields::validate(&submission);
    if !errors.is_empty() {
        return Err(ContactError::Validation(errors));
    }

    let now = Utc::now();
    let key = rate_limit::client_key(client_ip);
    let window = state.config.cooldown_secs;

    if let Err(retry_after) =
        rate_limit::check(state.cooldowns.as_ref(), &key, now.timestamp(), window).await
    {
        tracing::debug!("Cooldown active for {client_ip}, retry after {retry_after}s");
        return Err(ContactError::RateLimited { retry_after });
    }

    let message = compose(&submission, now, state.config.site_url.as_deref());

    mailer
        .send(&message)
        .await
        .map_err(|e| ContactError::Delivery(e.to_string()))?;

    state.cooldowns.record(&key, now.timestamp()).await;
    tracing::info!("Contact message relayed for {}", submission.email);

    Ok(Outcome::Sent)
}

/// Build the HTML and plain-text representations of a validated submission.
pub fn compose(
    submission: &Submission,
    submitted_at: chrono::DateTime<Utc>,
    site_url: Option<&str>,
) -> ContactMessage {
    let fields = ContactFields {
        name: &submission.name,
        email: &submission.email,
        message: &submission.message,
        submitted_at,
        site_url,
    };

    ContactMessage {
        reply_to_name: submission.name.clone(),
        reply_to_email: submission.email.clone(),
        html_body: templates::render_contact_html(&fields),
        text_body: templates::render_contact_text(&fields),
        submitted_at,
    }
}
