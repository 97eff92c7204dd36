pub mod templates;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{SmtpConfig, SmtpSecurity};

/// A composed contact-form email, ready for a transport.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub reply_to_name: String,
    pub reply_to_email: String,
    pub html_body: String,
    pub text_body: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct DeliveryError {
    pub message: String,
}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DeliveryError {}

impl From<String> for DeliveryError {
    fn from(s: String) -> Self {
        DeliveryError { message: s }
    }
}

impl From<&str> for DeliveryError {
    fn from(s: &str) -> Self {
        DeliveryError {
            message: s.to_string(),
        }
    }
}

/// Delivers contact messages. One call is one attempt.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &ContactMessage) -> Result<(), DeliveryError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipient: Mailbox,
    subject: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let builder = match config.security {
            SmtpSecurity::Ssl => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| format!("SMTP relay error: {e}"))?,
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| format!("SMTP starttls error: {e}"))?,
        };

        let transport = builder
            .port(config.port)
            .credentials(creds)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        let from_address: Address = config
            .from
            .parse()
            .map_err(|e| format!("Invalid from address: {e}"))?;
        let recipient: Address = config
            .recipient
            .parse()
            .map_err(|e| format!("Invalid recipient address: {e}"))?;

        Ok(Self {
            transport,
            from: Mailbox::new(config.from_name.clone(), from_address),
            recipient: Mailbox::new(None, recipient),
            subject: config.subject.clone(),
        })
    }

    fn build(&self, message: &ContactMessage) -> Result<Message, DeliveryError> {
        let reply_to_address: Address = message
            .reply_to_email
            .parse()
            .map_err(|e| DeliveryError::from(format!("Invalid reply-to address: {e}")))?;
        let reply_to = Mailbox::new(Some(message.reply_to_name.clone()), reply_to_address);

        Message::builder()
            .from(self.from.clone())
            .to(self.recipient.clone())
            .reply_to(reply_to)
            .subject(self.subject.clone())
            .date(message.submitted_at.into())
            .multipart(MultiPart::alternative_plain_html(
                message.text_body.clone(),
                message.html_body.clone(),
            ))
            .map_err(|e| DeliveryError::from(format!("Failed to build email: {e}")))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &ContactMessage) -> Result<(), DeliveryError> {
        let email = self.build(message)?;

        self.transport
            .send(email)
            .await
            .map_err(|e| DeliveryError::from(format!("Failed to send email: {e}")))?;

        Ok(())
    }
}
