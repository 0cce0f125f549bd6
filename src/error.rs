//! Configuration error types for the Eventbrite API client.
//!
//! Every validated configuration value ([`BearerToken`](crate::BearerToken),
//! [`BaseUrl`](crate::BaseUrl), [`ClientConfig`](crate::ClientConfig)) fails
//! fast with a [`ConfigError`] so that no partially-configured client can be
//! constructed.
//!
//! # Example
//!
//! ```rust
//! use eventbrite_api::{BearerToken, ConfigError};
//!
//! let result = BearerToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The bearer token was empty or only whitespace.
    #[error("An OAuth token is required to connect to the Eventbrite API.")]
    EmptyToken,

    /// The bearer token cannot be sent in an `Authorization` header.
    #[error("Invalid OAuth token. The token contains characters that cannot be sent in an HTTP header (check for stray newlines).")]
    InvalidToken,

    /// The base URL could not be parsed or is not http(s).
    #[error("Invalid base URL '{url}'. Expected an absolute http(s) URL (e.g., 'https://www.eventbriteapi.com/v3/').")]
    InvalidBaseUrl {
        /// The URL that was provided.
        url: String,
    },

    /// A default header has a name or value that cannot be sent over HTTP.
    #[error("Invalid default header '{name}'. Header names and values must be valid HTTP header text.")]
    InvalidHeader {
        /// The name of the offending header.
        name: String,
    },
}
