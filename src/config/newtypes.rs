//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around the values a client needs
//! before it can talk to Eventbrite. Invalid values are rejected on
//! construction with clear error messages.

use crate::error::ConfigError;
use reqwest::header::HeaderValue;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::Url;

/// The Eventbrite v3 API root used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.eventbriteapi.com/v3/";

/// A validated Eventbrite OAuth bearer token.
///
/// This newtype ensures the token is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use eventbrite_api::BearerToken;
///
/// let token = BearerToken::new("my-oauth-token").unwrap();
/// assert_eq!(token.as_ref(), "my-oauth-token");
/// assert_eq!(format!("{:?}", token), "BearerToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Creates a new validated bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty or consists
    /// only of whitespace, and [`ConfigError::InvalidToken`] if it contains
    /// characters that cannot be sent in an `Authorization` header (such as
    /// a trailing newline).
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }

        let token = Self(token);
        if HeaderValue::from_str(&token.authorization_header()).is_err() {
            return Err(ConfigError::InvalidToken);
        }
        Ok(token)
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl AsRef<str> for BearerToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(*****)")
    }
}

/// A validated base URL that endpoints are resolved against.
///
/// The URL must be absolute and use the `http` or `https` scheme. The path
/// is always stored with a trailing `/` so that relative endpoints such as
/// `users/me/` resolve underneath it instead of replacing its last segment.
///
/// # Example
///
/// ```rust
/// use eventbrite_api::BaseUrl;
///
/// let url = BaseUrl::new("https://www.eventbriteapi.com/v3").unwrap();
/// assert_eq!(url.as_ref(), "https://www.eventbriteapi.com/v3/");
/// assert_eq!(BaseUrl::default().as_ref(), "https://www.eventbriteapi.com/v3/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL cannot be parsed,
    /// has no host, or uses a scheme other than `http`/`https`.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let invalid = || ConfigError::InvalidBaseUrl { url: raw.clone() };

        let mut parsed = Url::parse(raw.trim()).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(invalid());
        }

        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        parsed.set_fragment(None);

        Ok(Self(parsed))
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL"))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_rejects_empty_string() {
        assert!(matches!(BearerToken::new(""), Err(ConfigError::EmptyToken)));
    }

    #[test]
    fn test_bearer_token_rejects_whitespace() {
        assert!(matches!(
            BearerToken::new("   \t"),
            Err(ConfigError::EmptyToken)
        ));
    }

    #[test]
    fn test_bearer_token_rejects_header_breaking_characters() {
        assert!(matches!(
            BearerToken::new("abc123\n"),
            Err(ConfigError::InvalidToken)
        ));
        assert!(matches!(
            BearerToken::new("abc\r\n123"),
            Err(ConfigError::InvalidToken)
        ));
    }

    #[test]
    fn test_bearer_token_masks_value_in_debug() {
        let token = BearerToken::new("super-secret-token").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "BearerToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_bearer_token_authorization_header() {
        let token = BearerToken::new("abc123").unwrap();
        assert_eq!(token.authorization_header(), "Bearer abc123");
    }

    #[test]
    fn test_base_url_appends_trailing_slash() {
        let url = BaseUrl::new("https://example.com/api/v3").unwrap();
        assert_eq!(url.as_ref(), "https://example.com/api/v3/");

        let url = BaseUrl::new("http://localhost:8080").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:8080/");
    }

    #[test]
    fn test_base_url_keeps_existing_trailing_slash() {
        let url = BaseUrl::new("https://www.eventbriteapi.com/v3/").unwrap();
        assert_eq!(url.as_ref(), "https://www.eventbriteapi.com/v3/");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        // No scheme
        assert!(BaseUrl::new("www.eventbriteapi.com/v3/").is_err());

        // Unsupported scheme
        assert!(BaseUrl::new("ftp://example.com/").is_err());

        // Not a URL at all
        assert!(matches!(
            BaseUrl::new("not a url"),
            Err(ConfigError::InvalidBaseUrl { url }) if url == "not a url"
        ));
    }

    #[test]
    fn test_default_base_url_is_eventbrite_v3() {
        assert_eq!(BaseUrl::default().as_ref(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_serialization_round_trip() {
        let original = BaseUrl::new("https://example.com/v3").unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, r#""https://example.com/v3/""#);

        let restored: BaseUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_base_url_deserialize_rejects_invalid() {
        let result: Result<BaseUrl, _> = serde_json::from_str(r#""nope""#);
        assert!(result.is_err());
    }
}
