//! The transport capability the client sends requests through.
//!
//! [`Transport`] is the only thing the client needs from an HTTP stack: take
//! a fully-built [`HttpRequest`] and return the [`RawResponse`] or a
//! [`TransportFailure`]. [`ReqwestTransport`] is the default implementation;
//! tests and embedders can inject their own through
//! [`ClientConfigBuilder::transport`](crate::ClientConfigBuilder::transport).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Version;

use crate::clients::errors::TransportFailure;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::{RawResponse, ResponseHeaders};

/// Sends built requests and returns what came back.
///
/// Implementations own connection handling, TLS, timeouts and any retry
/// policy. Any HTTP status, including 4xx and 5xx, is a successful send;
/// only a missing response is a [`TransportFailure`].
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use eventbrite_api::{HttpRequest, RawResponse, Transport, TransportFailure};
///
/// #[derive(Debug)]
/// struct AlwaysOk;
///
/// #[async_trait]
/// impl Transport for AlwaysOk {
///     async fn send(&self, _request: &HttpRequest) -> Result<RawResponse, TransportFailure> {
///         Ok(RawResponse::new(200).body("{}"))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` and returns the response.
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportFailure>;
}

/// The default [`Transport`], backed by a `reqwest` client with rustls.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport whose requests time out after `timeout`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Wraps a pre-configured reqwest client.
    ///
    /// The client is used as-is; its own timeout and TLS settings apply.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Maps a protocol version string to a reqwest [`Version`].
    ///
    /// Only HTTP/1.x is offered: the crate builds reqwest without its
    /// `http2` feature, so an HTTP/2 request could never be sent.
    fn parse_version(version: &str) -> Result<Version, TransportFailure> {
        match version {
            "1.0" => Ok(Version::HTTP_10),
            "1.1" => Ok(Version::HTTP_11),
            other => Err(TransportFailure::UnsupportedProtocolVersion {
                version: other.to_string(),
            }),
        }
    }

    fn format_version(version: Version) -> String {
        match version {
            Version::HTTP_09 => "0.9",
            Version::HTTP_10 => "1.0",
            Version::HTTP_2 => "2",
            Version::HTTP_3 => "3",
            _ => "1.1",
        }
        .to_string()
    }

    /// Collects response headers, preserving repeated values in order.
    fn collect_headers(headers: &reqwest::header::HeaderMap) -> ResponseHeaders {
        let mut result = ResponseHeaders::new();
        for (name, value) in headers {
            result
                .entry(name.as_str().to_string())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }
        result
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportFailure> {
        let version = Self::parse_version(&request.protocol_version)?;

        let mut builder = self
            .client
            .request(request.method.into(), request.url.clone())
            .version(version);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let protocol_version = Self::format_version(response.version());
        let headers = Self::collect_headers(response.headers());
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
            protocol_version,
        })
    }
}
