//! Bodies for the relayed contact email.
//!
//! Field values arrive already HTML-escaped by the sanitizer and are
//! interpolated as-is.

use chrono::{DateTime, Utc};

pub struct ContactFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
    pub submitted_at: DateTime<Utc>,
    pub site_url: Option<&'a str>,
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn render_contact_html(fields: &ContactFields<'_>) -> String {
    let name = fields.name;
    let email = fields.email;
    let message = fields.message;
    let submitted = format_timestamp(fields.submitted_at);
    let origin = match fields.site_url {
        Some(url) => format!(
            r#"<a href="{url}" style="color: #3498db;">{}</a>"#,
            display_host(url)
        ),
        None => "the website".to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Contact Form Submission</title></head>
<body style="font-family: Arial, Helvetica, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="background-color: #f9f9f9; border-radius: 8px; padding: 30px; border: 1px solid #e0e0e0;">
        <h1 style="color: #2c3e50; margin-top: 0; border-bottom: 2px solid #3498db; padding-bottom: 10px;">New Contact Form Submission</h1>
        <table style="width: 100%; border-collapse: collapse;">
            <tr>
                <td style="padding: 10px 0; font-weight: bold; color: #555; width: 120px;">Name:</td>
                <td style="padding: 10px 0;">{name}</td>
            </tr>
            <tr>
                <td style="padding: 10px 0; font-weight: bold; color: #555;">Email:</td>
                <td style="padding: 10px 0;"><a href="mailto:{email}" style="color: #3498db;">{email}</a></td>
            </tr>
            <tr>
                <td style="padding: 10px 0; font-weight: bold; color: #555; vertical-align: top;">Message:</td>
                <td style="padding: 10px 0;">
                    <div style="background-color: #fff; padding: 15px; border-radius: 4px; border: 1px solid #e0e0e0; white-space: pre-wrap;">{message}</div>
                </td>
            </tr>
        </table>
        <hr style="border: none; border-top: 1px solid #e0e0e0; margin: 30px 0;">
        <p style="font-size: 12px; color: #888; margin: 0;">
            This email was sent from the contact form on {origin}<br>
            Submitted on: <strong>{submitted}</strong>
        </p>
    </div>
</body>
</html>"#
    )
}

pub fn render_contact_text(fields: &ContactFields<'_>) -> String {
    let name = fields.name;
    let email = fields.email;
    let message = fields.message;
    let submitted = format_timestamp(fields.submitted_at);
    let origin = fields
        .site_url
        .map(display_host)
        .unwrap_or("the website");

    format!(
        "NEW CONTACT FORM SUBMISSION
===========================

Name: {name}
Email: {email}

Message:
{message}

---------------------------
This email was sent from the contact form on {origin}
Submitted on: {submitted}
"
    )
}

fn display_host(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.trim_end_matches('/')
}
