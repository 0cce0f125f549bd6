//! HTTP request types for the Eventbrite API client.
//!
//! This module provides the [`HttpMethod`] verbs the API accepts, the
//! per-call [`RequestOptions`] bag and the fully-built [`HttpRequest`] that is
//! handed to a [`Transport`](crate::Transport).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::clients::errors::InvalidVerbError;

/// Protocol version used when a call does not ask for one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "1.1";

/// Query parameters, sorted by key so the request target is deterministic.
pub type Params = BTreeMap<String, String>;

/// Request headers keyed by name.
///
/// Names are compared case-insensitively when merging, see [`insert_header`].
pub type Headers = BTreeMap<String, String>;

/// HTTP methods supported by the Eventbrite API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Every supported method.
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Returns the upper-case method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` if `verb` names a supported method, ignoring case.
    #[must_use]
    pub fn is_valid(verb: &str) -> bool {
        verb.parse::<Self>().is_ok()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidVerbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidVerbError {
                verb: s.to_string(),
            })
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A request body.
///
/// JSON bodies are serialized on send and get a `Content-Type:
/// application/json` header unless the caller already set one. Text and
/// byte bodies are sent as-is.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A structured value serialized as JSON.
    Json(serde_json::Value),
    /// A text payload.
    Text(String),
    /// An opaque binary payload.
    Bytes(Vec<u8>),
}

impl RequestBody {
    /// Returns the wire representation of the body.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Json(value) => value.to_string().into_bytes(),
            Self::Text(text) => text.clone().into_bytes(),
            Self::Bytes(bytes) => bytes.clone(),
        }
    }

    /// Returns the content type implied by the body, if any.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some("application/json"),
            Self::Text(_) | Self::Bytes(_) => None,
        }
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Per-call options.
///
/// # Example
///
/// ```rust
/// use eventbrite_api::RequestOptions;
///
/// let options = RequestOptions::new()
///     .query_param("expand", "event.venue")
///     .header("X-Trace", "1")
///     .raw_response(true);
///
/// assert_eq!(options.query.get("expand"), Some(&"event.venue".to_string()));
/// assert_eq!(options.protocol_version, "1.1");
/// assert!(options.raw_response);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RequestOptions {
    /// Query parameters appended to the request target.
    pub query: Params,
    /// Request body, if any.
    pub body: Option<RequestBody>,
    /// Headers layered over the client defaults.
    pub headers: Headers,
    /// HTTP protocol version (`"1.0"` or `"1.1"`).
    pub protocol_version: String,
    /// Return the transport response untouched instead of normalizing it.
    pub raw_response: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            query: Params::new(),
            body: None,
            headers: Headers::new(),
            protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
            raw_response: false,
        }
    }
}

impl RequestOptions {
    /// Creates empty options with the default protocol version.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Sets the request body, replacing any previous one.
    #[must_use]
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a single header, replacing any header with the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert_header(&mut self.headers, name.into(), value.into());
        self
    }

    /// Sets the HTTP protocol version.
    #[must_use]
    pub fn protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    /// Asks for the raw transport response instead of a normalized one.
    #[must_use]
    pub const fn raw_response(mut self, raw: bool) -> Self {
        self.raw_response = raw;
        self
    }

    /// Layers explicit per-call values over these options.
    ///
    /// `params` and `headers` are merged key by key, with the explicit value
    /// winning on collision. An explicit `body` replaces the existing one.
    /// `None` leaves the corresponding field untouched.
    #[must_use]
    pub fn merged(
        mut self,
        params: Option<Params>,
        body: Option<RequestBody>,
        headers: Option<Headers>,
    ) -> Self {
        if let Some(params) = params {
            self.query.extend(params);
        }
        if let Some(body) = body {
            self.body = Some(body);
        }
        if let Some(headers) = headers {
            for (name, value) in headers {
                insert_header(&mut self.headers, name, value);
            }
        }
        self
    }
}

/// Inserts a header, first removing any header whose name matches
/// case-insensitively.
pub fn insert_header(headers: &mut Headers, name: String, value: String) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
    headers.insert(name, value);
}

/// Looks up a header by name, ignoring case.
#[must_use]
pub fn find_header<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// A fully-built request, ready to be handed to a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute request URL, including the query string.
    pub url: Url,
    /// The final header set (client defaults plus per-call headers).
    pub headers: Headers,
    /// The serialized body, if any.
    pub body: Option<Vec<u8>>,
    /// The HTTP protocol version requested.
    pub protocol_version: String,
}

impl HttpRequest {
    /// Looks up a header by name, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Returns the body as UTF-8 text, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}
