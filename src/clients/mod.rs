//! HTTP client types for Eventbrite API communication.
//!
//! This module provides the client layer for making authenticated requests
//! to the Eventbrite v3 REST API: building requests, sending them through a
//! pluggable transport and normalizing what comes back.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`EventbriteClient`]: The async client for API communication
//! - [`Transport`]: The capability the client sends requests through
//! - [`ReqwestTransport`]: The default reqwest-backed transport
//! - [`RequestOptions`]: Per-call query, body, headers and protocol options
//! - [`HttpRequest`]: A fully-built request as handed to the transport
//! - [`HttpResponse`]: A normalized `{code, headers, body}` response
//! - [`RawResponse`]: A response exactly as the transport returned it
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//!
//! # Example
//!
//! ```rust,ignore
//! use eventbrite_api::{EventbriteClient, RequestOptions};
//!
//! let client = EventbriteClient::new("my-oauth-token")?;
//!
//! let options = RequestOptions::new().query_param("status", "live");
//! let response = client
//!     .get("organizations/123/events/", None, None, None, Some(options))
//!     .await?;
//!
//! if let Some(body) = response.as_normalized().and_then(|r| r.json()) {
//!     println!("{}", body["events"]);
//! }
//! ```
//!
//! # Status Codes
//!
//! The client never turns an HTTP status into an error. Errors are reserved
//! for calls that could not be made (bad verb, unresolvable endpoint) or for
//! which no response arrived. No retries are performed.

mod api_client;
mod errors;
mod http_request;
mod http_response;
mod normalizer;
mod transport;

pub use api_client::{EventbriteClient, CURRENT_USER_ENDPOINT, SDK_VERSION};
pub use errors::{ClientError, InvalidVerbError, TransportError, TransportFailure};
pub use http_request::{
    find_header, insert_header, Headers, HttpMethod, HttpRequest, Params, RequestBody,
    RequestOptions, DEFAULT_PROTOCOL_VERSION,
};
pub use http_response::{
    ApiResponse, Exchange, HttpResponse, RawResponse, ResponseBody, ResponseHeaders,
};
pub use normalizer::{is_valid_json, normalize_response};
pub use transport::{ReqwestTransport, Transport};
