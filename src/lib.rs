//! # Eventbrite API Rust Client
//!
//! A lightweight client for the Eventbrite v3 REST API. It authenticates
//! every request with an OAuth bearer token, sends it through a pluggable
//! transport and hands back a normalized `{code, headers, body}` response.
//!
//! ## Overview
//!
//! This crate provides:
//! - An async client, [`EventbriteClient`], with GET, POST, PUT, PATCH and DELETE shortcuts
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the bearer token and base URL
//! - Response normalization: JSON bodies decoded, anything else kept as text
//! - A [`Transport`] seam for injecting a custom HTTP stack or a test double
//!
//! ## Quick Start
//!
//! ```rust
//! use eventbrite_api::{BaseUrl, ClientConfig, EventbriteClient};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://www.eventbriteapi.com/v3/").unwrap())
//!     .default_header("Accept-Language", "en-GB")
//!     .build()
//!     .unwrap();
//!
//! let client = EventbriteClient::with_config("my-oauth-token", config).unwrap();
//! assert_eq!(
//!     client.default_headers().get("Authorization").map(String::as_str),
//!     Some("Bearer my-oauth-token")
//! );
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use eventbrite_api::{EventbriteClient, ResponseBody};
//! use serde_json::json;
//!
//! let client = EventbriteClient::new("my-oauth-token")?;
//!
//! // Check the token before doing real work
//! if !client.can_connect().await? {
//!     eprintln!("Token rejected");
//! }
//!
//! // Create an event
//! let body = json!({"event": {"name": {"html": "Launch party"}, "currency": "GBP"}});
//! let response = client
//!     .post("organizations/123/events/", None, Some(body.into()), None, None)
//!     .await?;
//!
//! // Verbs can also be chosen at runtime
//! let response = client.call("delete", "events/42/", None).await?;
//! println!("Deleted: {}", response.is_ok());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Tokens, base URLs and headers are checked on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Statuses are data**: A 404 is a response, not an error

pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{
    BaseUrl, BearerToken, ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    is_valid_json, normalize_response, ApiResponse, ClientError, EventbriteClient, Exchange,
    Headers, HttpMethod, HttpRequest, HttpResponse, InvalidVerbError, Params, RawResponse,
    RequestBody, RequestOptions, ReqwestTransport, ResponseBody, ResponseHeaders, Transport,
    TransportError, TransportFailure, SDK_VERSION,
};
