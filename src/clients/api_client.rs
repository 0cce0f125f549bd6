//! The Eventbrite API client.
//!
//! This module provides [`EventbriteClient`], which builds authenticated
//! requests, sends them through a [`Transport`] and normalizes the results.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

use crate::clients::errors::{ClientError, TransportError};
use crate::clients::http_request::{
    find_header, insert_header, Headers, HttpMethod, HttpRequest, Params, RequestBody,
    RequestOptions,
};
use crate::clients::http_response::{ApiResponse, Exchange, RawResponse};
use crate::clients::normalizer::normalize_response;
use crate::clients::transport::{ReqwestTransport, Transport};
use crate::config::{BaseUrl, BearerToken, ClientConfig};
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Endpoint probed by [`EventbriteClient::can_connect`].
pub const CURRENT_USER_ENDPOINT: &str = "users/me/";

fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Client for the Eventbrite v3 REST API.
///
/// Every request carries `Authorization: Bearer <token>` and a library
/// `User-Agent`. Neither can be overridden by configuration. Per-call
/// headers are layered over the client defaults.
///
/// Responses are never rejected because of their status code: a 404 comes
/// back as an ordinary response with `code == 404`.
///
/// # Diagnostics
///
/// [`last_request`](Self::last_request) and
/// [`last_response`](Self::last_response) hold whatever the most recently
/// finished call saw. When one client is shared between concurrent tasks
/// these slots are last-writer-wins; use [`execute`](Self::execute) to get
/// the request and response of a specific call.
///
/// # Thread Safety
///
/// `EventbriteClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use eventbrite_api::EventbriteClient;
/// use std::collections::BTreeMap;
///
/// let client = EventbriteClient::new("my-oauth-token")?;
///
/// let params = BTreeMap::from([("expand".to_string(), "event.venue".to_string())]);
/// let response = client.get("users/me/orders/", Some(params), None, None, None).await?;
///
/// println!("Status: {}", response.code());
/// ```
#[derive(Debug)]
pub struct EventbriteClient {
    base_url: BaseUrl,
    default_headers: Headers,
    transport: Arc<dyn Transport>,
    last_request: Mutex<Option<HttpRequest>>,
    last_response: Mutex<Option<RawResponse>>,
}

// Verify EventbriteClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EventbriteClient>();
};

impl EventbriteClient {
    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if `token` is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eventbrite_api::{ConfigError, EventbriteClient};
    ///
    /// let client = EventbriteClient::new("my-oauth-token").unwrap();
    /// assert_eq!(client.base_url().as_ref(), "https://www.eventbriteapi.com/v3/");
    ///
    /// assert!(matches!(EventbriteClient::new(""), Err(ConfigError::EmptyToken)));
    /// ```
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_config(token, ClientConfig::default())
    }

    /// Creates a client from an explicit configuration.
    ///
    /// Caller default headers override the library defaults (such as
    /// `Accept`), but `User-Agent` and `Authorization` are applied last.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if `token` is empty, or
    /// [`ConfigError::InvalidToken`] if it cannot be sent in a header.
    pub fn with_config(token: impl Into<String>, config: ClientConfig) -> Result<Self, ConfigError> {
        let token = BearerToken::new(token)?;

        let mut default_headers = Headers::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        for (name, value) in config.default_headers() {
            insert_header(&mut default_headers, name.clone(), value.clone());
        }

        for reserved in ["User-Agent", "Authorization"] {
            if find_header(&default_headers, reserved).is_some() {
                tracing::debug!(
                    "Ignoring configured {} header; it is always set by the client",
                    reserved
                );
            }
        }

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}eventbrite-api v{SDK_VERSION} | Rust {rust_version}");

        // Identification headers go in last so nothing can shadow them.
        insert_header(&mut default_headers, "User-Agent".to_string(), user_agent);
        insert_header(
            &mut default_headers,
            "Authorization".to_string(),
            token.authorization_header(),
        );

        let transport = config.transport().cloned().unwrap_or_else(|| {
            Arc::new(ReqwestTransport::new(config.timeout())) as Arc<dyn Transport>
        });

        Ok(Self {
            base_url: config.base_url().clone(),
            default_headers,
            transport,
            last_request: Mutex::new(None),
            last_response: Mutex::new(None),
        })
    }

    /// Returns the base URL endpoints are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// Builds the request `execute` would send, without sending it.
    ///
    /// The endpoint is resolved against the base URL (leading `/` is
    /// stripped so it stays under the base path; an absolute URL is used
    /// as-is). Option query pairs are appended after any query string already
    /// on the endpoint; an endpoint pair whose key also appears in the
    /// options is dropped so the per-call value is the only one sent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if the endpoint cannot be
    /// resolved, or [`ClientError::InvalidHeader`] if a per-call header is
    /// not valid HTTP header text.
    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<HttpRequest, ClientError> {
        let mut url = self.resolve(endpoint)?;
        if !options.query.is_empty() {
            Self::merge_query(&mut url, &options.query);
        }

        let mut headers = self.default_headers.clone();
        for (name, value) in &options.headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err()
                || HeaderValue::from_str(value).is_err()
            {
                return Err(ClientError::InvalidHeader { name: name.clone() });
            }
            insert_header(&mut headers, name.clone(), value.clone());
        }

        if let Some(content_type) = options.body.as_ref().and_then(RequestBody::content_type) {
            if find_header(&headers, "Content-Type").is_none() {
                headers.insert("Content-Type".to_string(), content_type.to_string());
            }
        }

        Ok(HttpRequest {
            method,
            url,
            headers,
            body: options.body.as_ref().map(RequestBody::to_bytes),
            protocol_version: options.protocol_version.clone(),
        })
    }

    /// Appends `query` to `url`, replacing endpoint pairs with the same key.
    fn merge_query(url: &mut Url, query: &Params) {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !query.contains_key(&**key))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.set_query(None);
        url.query_pairs_mut()
            .extend_pairs(&kept)
            .extend_pairs(query);
    }

    fn resolve(&self, endpoint: &str) -> Result<Url, ClientError> {
        self.base_url
            .as_url()
            .join(endpoint.trim_start_matches('/'))
            .map_err(|reason| ClientError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason,
            })
    }

    /// Sends a request and returns it together with its response.
    ///
    /// This is the core operation every other request method funnels into.
    /// The request is recorded as the last request before sending and the
    /// transport response as the last response once it arrives.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if the endpoint cannot be
    /// resolved, or [`ClientError::Transport`] if no response could be
    /// obtained. The core performs no retries.
    pub async fn execute(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Exchange, ClientError> {
        let request = self.build_request(method, endpoint, &options)?;

        tracing::debug!("Sending {} request to {}", request.method, request.url);
        *lock(&self.last_request) = Some(request.clone());

        let raw = match self.transport.send(&request).await {
            Ok(raw) => raw,
            Err(source) => {
                tracing::warn!(
                    "Transport failure for {} {}: {}",
                    request.method,
                    request.url,
                    source
                );
                return Err(TransportError {
                    request: Box::new(request),
                    source,
                }
                .into());
            }
        };

        tracing::debug!(
            "Received {} from {} {}",
            raw.status,
            request.method,
            request.url
        );
        *lock(&self.last_response) = Some(raw.clone());

        let response = if options.raw_response {
            ApiResponse::Raw(raw)
        } else {
            ApiResponse::Normalized(normalize_response(&raw))
        };

        Ok(Exchange { request, response })
    }

    /// Sends a request for a verb given by name.
    ///
    /// The verb is matched case-insensitively against GET, POST, PUT, PATCH
    /// and DELETE.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidVerb`] for any other verb, in which case
    /// nothing is sent and the client stays usable. Otherwise fails as
    /// [`execute`](Self::execute) does.
    pub async fn call(
        &self,
        verb: &str,
        endpoint: &str,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        let method: HttpMethod = verb.parse()?;
        let exchange = self
            .execute(method, endpoint, options.unwrap_or_default())
            .await?;
        Ok(exchange.response)
    }

    /// Merges explicit per-call values into `options` and sends the request.
    ///
    /// `params` and `headers` are merged over `options.query` and
    /// `options.headers` (explicit values win); `body` replaces
    /// `options.body`.
    ///
    /// # Errors
    ///
    /// Fails as [`execute`](Self::execute) does.
    pub async fn make_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: Option<Params>,
        body: Option<RequestBody>,
        headers: Option<Headers>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        let options = options.unwrap_or_default().merged(params, body, headers);
        let exchange = self.execute(method, endpoint, options).await?;
        Ok(exchange.response)
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Fails as [`execute`](Self::execute) does.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let response = client.get("users/me/", None, None, None, None).await?;
    /// ```
    pub async fn get(
        &self,
        endpoint: &str,
        params: Option<Params>,
        body: Option<RequestBody>,
        headers: Option<Headers>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        self.make_request(HttpMethod::Get, endpoint, params, body, headers, options)
            .await
    }

    /// Sends a POST request.
    ///
    /// # Errors
    ///
    /// Fails as [`execute`](Self::execute) does.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let body = serde_json::json!({"event": {"name": {"html": "Launch party"}}});
    /// let response = client
    ///     .post("organizations/123/events/", None, Some(body.into()), None, None)
    ///     .await?;
    /// ```
    pub async fn post(
        &self,
        endpoint: &str,
        params: Option<Params>,
        body: Option<RequestBody>,
        headers: Option<Headers>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        self.make_request(HttpMethod::Post, endpoint, params, body, headers, options)
            .await
    }

    /// Sends a PUT request.
    ///
    /// # Errors
    ///
    /// Fails as [`execute`](Self::execute) does.
    pub async fn put(
        &self,
        endpoint: &str,
        params: Option<Params>,
        body: Option<RequestBody>,
        headers: Option<Headers>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        self.make_request(HttpMethod::Put, endpoint, params, body, headers, options)
            .await
    }

    /// Sends a PATCH request.
    ///
    /// # Errors
    ///
    /// Fails as [`execute`](Self::execute) does.
    pub async fn patch(
        &self,
        endpoint: &str,
        params: Option<Params>,
        body: Option<RequestBody>,
        headers: Option<Headers>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        self.make_request(HttpMethod::Patch, endpoint, params, body, headers, options)
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Fails as [`execute`](Self::execute) does.
    pub async fn delete(
        &self,
        endpoint: &str,
        params: Option<Params>,
        body: Option<RequestBody>,
        headers: Option<Headers>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        self.make_request(HttpMethod::Delete, endpoint, params, body, headers, options)
            .await
    }

    /// Checks whether the API accepts this client's token.
    ///
    /// Requests the current user and returns `true` for any 2xx status,
    /// `false` for any other status.
    ///
    /// # Errors
    ///
    /// Transport failures are returned, not folded into `false`.
    pub async fn can_connect(&self) -> Result<bool, ClientError> {
        let response = self
            .get(CURRENT_USER_ENDPOINT, None, None, None, None)
            .await?;
        Ok(response.is_ok())
    }

    /// Returns the most recently built request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.last_request).clone()
    }

    /// Returns the most recent raw transport response, if any.
    #[must_use]
    pub fn last_response(&self) -> Option<RawResponse> {
        lock(&self.last_response).clone()
    }
}
