//! Error types for Eventbrite API calls.
//!
//! The client distinguishes three failure scenarios:
//!
//! - [`ConfigError`]: The client could not be constructed (e.g. empty token)
//! - [`InvalidVerbError`]: A call named an HTTP verb the API does not accept
//! - [`TransportError`]: No response could be obtained from the transport
//!
//! [`ClientError`] unifies them, together with endpoints that cannot be
//! resolved against the base URL and per-call headers that cannot be sent.
//! Non-2xx HTTP responses are *not* errors; they come back as ordinary
//! [`HttpResponse`](crate::HttpResponse) values.
//!
//! # Example
//!
//! ```rust,ignore
//! use eventbrite_api::ClientError;
//!
//! match client.get("users/me/", None, None, None, None).await {
//!     Ok(response) => println!("Status: {}", response.code()),
//!     Err(ClientError::InvalidVerb(e)) => println!("Bad verb: {}", e.verb),
//!     Err(ClientError::Transport(e)) => {
//!         println!("Could not reach {}: {}", e.request.url, e.source);
//!     }
//!     Err(other) => println!("Request not sent: {other}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::http_request::HttpRequest;
use crate::error::ConfigError;

/// Error returned when a verb string is not one of the supported methods.
///
/// The client remains usable after this error; the transport is never
/// invoked for the rejected call.
///
/// # Example
///
/// ```rust
/// use eventbrite_api::{HttpMethod, InvalidVerbError};
///
/// let error = "PUNT".parse::<HttpMethod>().unwrap_err();
/// assert_eq!(error, InvalidVerbError { verb: "PUNT".to_string() });
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unrecognised HTTP verb '{verb}'. Expected one of GET, POST, PUT, PATCH, DELETE.")]
pub struct InvalidVerbError {
    /// The verb that was rejected.
    pub verb: String,
}

/// The reason a [`Transport`](crate::Transport) could not produce a response.
#[derive(Debug, Error)]
pub enum TransportFailure {
    /// The underlying HTTP client failed (connection refused, timeout, TLS...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The requested protocol version is not supported by the transport.
    #[error("Unsupported HTTP protocol version '{version}'.")]
    UnsupportedProtocolVersion {
        /// The protocol version that was requested.
        version: String,
    },

    /// The connection was lost before a response arrived.
    #[error("Connection interrupted: {message}")]
    Interrupted {
        /// Transport-specific description.
        message: String,
    },
}

/// Error returned when a request could not be completed at the transport level.
///
/// Carries the request that was attempted so callers can see exactly what
/// was sent (or tried to be sent).
#[derive(Debug, Error)]
#[error("A bad response was received for {} {}: {source}", .request.method, .request.url)]
pub struct TransportError {
    /// The request that was being sent.
    pub request: Box<HttpRequest>,
    /// Why the transport failed.
    pub source: TransportFailure,
}

/// Unified error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP verb is not supported.
    #[error(transparent)]
    InvalidVerb(#[from] InvalidVerbError),

    /// The endpoint could not be resolved against the base URL.
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The endpoint that was provided.
        endpoint: String,
        /// Why resolution failed.
        reason: url::ParseError,
    },

    /// A per-call header name or value is not valid HTTP header text.
    #[error("Invalid request header '{name}'. Header names and values must be valid HTTP header text.")]
    InvalidHeader {
        /// The name of the offending header.
        name: String,
    },

    /// The transport failed to produce a response.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
