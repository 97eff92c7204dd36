use std::collections::HashMap;

use axum::http::HeaderMap;

pub type FormFields = HashMap<String, String>;

/// Parse a request body into form fields based on its Content-Type header.
pub async fn parse(headers: &HeaderMap, body: bytes::Bytes) -> Result<FormFields, String> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("multipart/form-data") {
        parse_multipart(content_type, body).await
    } else if content_type.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(&body)
    } else {
        Err(format!("Unsupported content type: '{content_type}'"))
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<FormFields, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    // Last occurrence wins for repeated keys.
    Ok(form_urlencoded::parse(body_str.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect())
}

async fn parse_multipart(content_type: &str, body: bytes::Bytes) -> Result<FormFields, String> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| format!("Missing multipart boundary: {e}"))?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut fields = FormFields::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        // File parts are not part of the contact form.
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| format!("Field read error: {e}"))?;
        fields.insert(name, value);
    }

    Ok(fields)
}
