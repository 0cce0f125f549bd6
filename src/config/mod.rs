//! Configuration types for the Eventbrite API client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: The immutable configuration a client is built from
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`BearerToken`]: A validated OAuth token newtype with masked debug output
//! - [`BaseUrl`]: A validated API root URL
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use eventbrite_api::{BaseUrl, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://www.eventbriteapi.com/v3/").unwrap())
//!     .default_header("X-Trace", "enabled")
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.timeout(), Duration::from_secs(10));
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, BearerToken, DEFAULT_BASE_URL};

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};

use crate::clients::Transport;
use crate::error::ConfigError;

/// Request timeout applied to the default transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an [`EventbriteClient`](crate::EventbriteClient).
///
/// A `ClientConfig` is produced once by [`ClientConfigBuilder::build`] and
/// never changes afterwards. The bearer token is deliberately not part of
/// the config; it is passed to the client constructor so that the
/// `Authorization` header cannot be shadowed by configuration.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: BaseUrl,
    default_headers: BTreeMap<String, String>,
    timeout: Duration,
    user_agent_prefix: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the base URL endpoints are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the caller-supplied default headers.
    ///
    /// These do not include the `Authorization` and `User-Agent` headers,
    /// which the client always sets itself.
    #[must_use]
    pub const fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    /// Returns the timeout handed to the default transport.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the injected transport, if any.
    #[must_use]
    pub fn transport(&self) -> Option<&Arc<dyn Transport>> {
        self.transport.as_ref()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            default_headers: BTreeMap::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent_prefix: None,
            transport: None,
        }
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// # Defaults
///
/// - `base_url`: `https://www.eventbriteapi.com/v3/`
/// - `default_headers`: empty
/// - `timeout`: 30 seconds
/// - `user_agent_prefix`: `None`
/// - `transport`: `None` (a reqwest transport is created by the client)
///
/// # Example
///
/// ```rust
/// use eventbrite_api::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
/// ```
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<BaseUrl>,
    default_headers: BTreeMap<String, String>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Adds a single default header sent with every request.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Adds several default headers at once, keeping any set earlier.
    #[must_use]
    pub fn default_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.default_headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the request timeout for the default transport.
    ///
    /// An injected transport is expected to carry its own timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a prefix that is prepended to the library `User-Agent`.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Injects the transport used to send requests.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if a default header name or
    /// value, or the user agent prefix, is not valid HTTP header text.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        for (name, value) in &self.default_headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err()
                || HeaderValue::from_str(value).is_err()
            {
                return Err(ConfigError::InvalidHeader { name: name.clone() });
            }
        }

        if let Some(prefix) = &self.user_agent_prefix {
            if HeaderValue::from_str(prefix).is_err() {
                return Err(ConfigError::InvalidHeader {
                    name: "User-Agent".to_string(),
                });
            }
        }

        Ok(ClientConfig {
            base_url: self.base_url.unwrap_or_default(),
            default_headers: self.default_headers,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            user_agent_prefix: self.user_agent_prefix,
            transport: self.transport,
        })
    }
}
