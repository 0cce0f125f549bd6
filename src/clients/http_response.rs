//! HTTP response types for the Eventbrite API client.
//!
//! A [`Transport`](crate::Transport) produces a [`RawResponse`]. Unless the
//! caller asked for the raw response, the client reduces it to an
//! [`HttpResponse`] whose body is decoded JSON when possible and raw text
//! otherwise.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::clients::http_request::HttpRequest;

/// Response headers; each name maps to its values in the order received.
pub type ResponseHeaders = BTreeMap<String, Vec<String>>;

fn first_header<'a>(headers: &'a ResponseHeaders, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(String::as_str)
}

/// A response exactly as the transport returned it.
///
/// # Example
///
/// ```rust
/// use eventbrite_api::RawResponse;
///
/// let raw = RawResponse::new(201)
///     .header("Content-Type", "text/html")
///     .body("<html></html>");
///
/// assert_eq!(raw.status, 201);
/// assert_eq!(raw.header_value("content-type"), Some("text/html"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, repeated values preserved in order.
    pub headers: ResponseHeaders,
    /// The undecoded response payload.
    pub body: Vec<u8>,
    /// The HTTP protocol version of the response (e.g. `"1.1"`).
    pub protocol_version: String,
}

impl RawResponse {
    /// Creates an empty response with the given status.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: ResponseHeaders::new(),
            body: Vec::new(),
            protocol_version: "1.1".to_string(),
        }
    }

    /// Appends a header value, keeping any earlier values for the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Sets the response payload.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the first value of a header, ignoring case.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        first_header(&self.headers, name)
    }

    /// Returns the payload as UTF-8 text, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A normalized response body.
///
/// Serializes transparently: a JSON body serializes as the value itself and
/// a text body as a JSON string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// The payload was valid JSON and has been decoded.
    Json(serde_json::Value),
    /// The payload was not valid JSON and is kept as text.
    Text(String),
}

/// A normalized `{code, headers, body}` response.
///
/// Non-2xx responses are returned as-is; use [`HttpResponse::is_ok`] to check.
///
/// # Example
///
/// ```rust
/// use eventbrite_api::{normalize_response, RawResponse, ResponseBody};
/// use serde_json::json;
///
/// let raw = RawResponse::new(200)
///     .header("Content-Type", "application/json")
///     .body(r#"{"test":"json"}"#);
///
/// let response = normalize_response(&raw);
/// assert_eq!(response.code, 200);
/// assert_eq!(response.body, ResponseBody::Json(json!({"test": "json"})));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, repeated values preserved in order.
    pub headers: ResponseHeaders,
    /// The decoded body.
    pub body: ResponseBody,
}

impl HttpResponse {
    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        first_header(&self.headers, name)
    }

    /// Returns the decoded JSON body, if the payload was JSON.
    #[must_use]
    pub const fn json(&self) -> Option<&serde_json::Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// Returns the text body, if the payload was not JSON.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }
}

/// The outcome of a successful call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiResponse {
    /// The response after normalization (the default).
    Normalized(HttpResponse),
    /// The untouched transport response (`raw_response` was set).
    Raw(RawResponse),
}

impl ApiResponse {
    /// Returns the HTTP status code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Normalized(response) => response.code,
            Self::Raw(raw) => raw.status,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        let code = self.code();
        code >= 200 && code <= 299
    }

    /// Returns the normalized response, if this is one.
    #[must_use]
    pub const fn as_normalized(&self) -> Option<&HttpResponse> {
        match self {
            Self::Normalized(response) => Some(response),
            Self::Raw(_) => None,
        }
    }

    /// Converts into the normalized response, if this is one.
    #[must_use]
    pub fn into_normalized(self) -> Option<HttpResponse> {
        match self {
            Self::Normalized(response) => Some(response),
            Self::Raw(_) => None,
        }
    }

    /// Converts into the raw response, if this is one.
    #[must_use]
    pub fn into_raw(self) -> Option<RawResponse> {
        match self {
            Self::Raw(raw) => Some(raw),
            Self::Normalized(_) => None,
        }
    }
}

/// A request paired with the response it produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exchange {
    /// The request as it was handed to the transport.
    pub request: HttpRequest,
    /// The response returned to the caller.
    pub response: ApiResponse,
}
