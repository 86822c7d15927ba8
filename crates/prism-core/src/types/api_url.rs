//! Server root URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Path prefix of the server's REST API.
const API_PREFIX: &str = "api/v1";

/// A validated root URL of a photo server.
///
/// The URL must be absolute with a host and use HTTP or HTTPS. Self-hosted
/// servers are commonly reached over plain HTTP on a LAN address.
/// It is normalized without a trailing slash so API endpoint URLs can be
/// built by simple concatenation. A server hosted under a sub-path
/// (e.g. `https://example.com/photos`) keeps that path.
///
/// # Example
///
/// ```
/// use prism_core::ApiUrl;
///
/// let root = ApiUrl::new("https://photos.example.com/").unwrap();
/// assert_eq!(root.api_url("session"), "https://photos.example.com/api/v1/session");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new root URL from a string, validating the format.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        let mut normalized = url;
        normalized.set_query(None);
        normalized.set_fragment(None);
        let path = normalized.path().trim_end_matches('/').to_string();
        normalized.set_path(&path);

        Ok(Self(normalized))
    }

    /// Returns the full URL of an API endpoint, e.g. `session` or `config`.
    pub fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base(),
            API_PREFIX,
            endpoint.trim_start_matches('/')
        )
    }

    /// Resolves a path relative to the server root, e.g. `api/v1/photos`.
    ///
    /// Absolute URLs are returned unchanged.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base(), path.trim_start_matches('/'))
    }

    /// Returns the root URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn base(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let root = ApiUrl::new("https://photos.example.com").unwrap();
        assert_eq!(root.host(), Some("photos.example.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let root = ApiUrl::new("http://localhost:2342").unwrap();
        assert_eq!(root.api_url("config"), "http://localhost:2342/api/v1/config");
    }

    #[test]
    fn keeps_sub_path_and_drops_trailing_slash() {
        let root = ApiUrl::new("https://example.com/photos/").unwrap();
        assert_eq!(
            root.api_url("/session"),
            "https://example.com/photos/api/v1/session"
        );
    }

    #[test]
    fn resolve_leaves_absolute_urls_alone() {
        let root = ApiUrl::new("https://example.com").unwrap();
        assert_eq!(
            root.resolve("https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(
            root.resolve("api/v1/photos"),
            "https://example.com/api/v1/photos"
        );
    }

    #[test]
    fn valid_http_lan_address() {
        let root = ApiUrl::new("http://192.168.1.20:2342").unwrap();
        assert_eq!(root.host(), Some("192.168.1.20"));
        assert_eq!(root.api_url("session"), "http://192.168.1.20:2342/api/v1/session");
    }

    #[test]
    fn invalid_scheme() {
        assert!(ApiUrl::new("ftp://photos.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api/v1/session").is_err());
    }
}
