use super::parser::FormFields;

/// Hidden form field real visitors never see.
pub const HONEYPOT_FIELD: &str = "_honey";

/// Check if the honeypot field is filled. Returns true if spam detected.
pub fn is_spam(fields: &FormFields) -> bool {
    fields
        .get(HONEYPOT_FIELD)
        .is_some_and(|value| !value.is_empty())
}
