//! Reduces transport responses to the normalized `{code, headers, body}` shape.

use crate::clients::http_response::{HttpResponse, RawResponse, ResponseBody};

/// Returns `true` if `text` is a complete, valid JSON document.
///
/// # Example
///
/// ```rust
/// use eventbrite_api::is_valid_json;
///
/// assert!(is_valid_json(r#"{"events": []}"#));
/// assert!(is_valid_json("null"));
/// assert!(!is_valid_json("<html></html>"));
/// assert!(!is_valid_json(""));
/// ```
#[must_use]
pub fn is_valid_json(text: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok()
}

/// Normalizes a raw transport response.
///
/// The status code and headers are copied over unchanged. The payload is
/// read as (lossy) UTF-8 text and decoded as JSON; if decoding fails the text
/// is kept verbatim. A malformed JSON body is never an error.
#[must_use]
pub fn normalize_response(raw: &RawResponse) -> HttpResponse {
    let text = raw.text();

    let body = match serde_json::from_str(&text) {
        Ok(value) => ResponseBody::Json(value),
        Err(e) => {
            tracing::trace!("Response body is not JSON ({e}); keeping raw text");
            ResponseBody::Text(text)
        }
    };

    HttpResponse {
        code: raw.status,
        headers: raw.headers.clone(),
        body,
    }
}
