use lettre::Address;

use super::honeypot::HONEYPOT_FIELD;
use super::parser::FormFields;
use super::sanitize::sanitize;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_MESSAGE_LEN: usize = 5000;

/// A contact-form submission after sanitization.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub honeypot: String,
}

impl Submission {
    /// Extract and sanitize the contact fields. Missing fields read as empty.
    pub fn from_fields(fields: &FormFields) -> Self {
        let field = |key: &str| fields.get(key).map(String::as_str).unwrap_or("");

        Submission {
            name: sanitize(field("name")),
            email: sanitize(field("email")),
            message: sanitize(field("message")),
            honeypot: field(HONEYPOT_FIELD).to_string(),
        }
    }
}

/// Validate a sanitized submission. Returns every failure, in field order.
pub fn validate(submission: &Submission) -> Vec<String> {
    let mut errors = Vec::new();

    let name = &submission.name;
    if name.is_empty() {
        errors.push("Name is required.".to_string());
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.push("Name must be less than 100 characters.".to_string());
    }

    let email = &submission.email;
    if email.is_empty() {
        errors.push("Email is required.".to_string());
    } else if !is_valid_email(email) {
        errors.push("Please provide a valid email address.".to_string());
    } else if email.chars().count() > MAX_EMAIL_LEN {
        errors.push("Email address is too long.".to_string());
    }

    let message = &submission.message;
    if message.is_empty() {
        errors.push("Message is required.".to_string());
    } else if message.chars().count() > MAX_MESSAGE_LEN {
        errors.push("Message must be less than 5000 characters.".to_string());
    }

    errors
}

pub fn is_valid_email(email: &str) -> bool {
    // Bare addr-spec only, and the domain must be dotted (no `user@localhost`).
    email.parse::<Address>().is_ok()
        && email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.'))
}
