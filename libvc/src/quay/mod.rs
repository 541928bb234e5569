//! Registry client for quay.io.
//!
//! Quay lists every tag of a repository, with its manifest digest and
//! last-modified time, from a single endpoint:
//! `GET https://quay.io/api/v1/repository/<repo-path>`.

use crate::api::{ImageClient, ImageTag};
use crate::client::HttpClient;
use crate::config::Config;
use crate::context::Context;
use crate::digest::parse_digest;
use crate::error::{Result, RegistryError};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};


/// Image references served by this client start with this prefix.
pub const IMAGE_PREFIX: &str = "quay.io/";

/// Base of the repository endpoint; the repository path is appended.
pub const DEFAULT_API_URL: &str = "https://quay.io/api/v1/repository";

/// Last-modified layout: RFC 1123 with a numeric zone.
pub const TIMESTAMP_LAYOUT: &str = "Mon, 02 Jan 2006 15:04:05 -0700";

/// chrono format for the layout after the `"Mon, "` weekday prefix.
const DATE_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Repository endpoint body. Only the fields needed here are decoded.
#[derive(Debug, Deserialize)]
struct RepositoryResponse {
    #[serde(default)]
    tags: Option<HashMap<String, RawTag>>,
}

#[derive(Debug, Deserialize)]
struct RawTag {
    #[serde(default)]
    manifest_digest: Option<String>,
    #[serde(default)]
    last_modified: Option<String>,
}

/// Client for the quay.io registry.
#[derive(Debug, Clone)]
pub struct QuayClient {
    http: HttpClient,
    api_url: String,
}

impl QuayClient {
    /// Creates a client for quay.io with the default HTTP configuration.
    pub fn new() -> Result<Self> {
        Ok(Self::with_http(HttpClient::new()?, DEFAULT_API_URL))
    }

    /// Creates a client that sends requests through `http` to `api_url`.
    ///
    /// `api_url` replaces [`DEFAULT_API_URL`]; it lets the client talk to a
    /// mirror or a test server while still routing `quay.io/` images.
    ///
    /// # Examples
    ///
    /// ```
    /// use libvc::client::HttpClient;
    /// use libvc::quay::QuayClient;
    ///
    /// let http = HttpClient::new().unwrap();
    /// let quay = QuayClient::with_http(http, "http://localhost:8080/api/v1/repository/");
    /// assert_eq!(quay.api_url(), "http://localhost:8080/api/v1/repository");
    /// ```
    pub fn with_http(http: HttpClient, api_url: &str) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client from the `network` and `quay` configuration sections.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = HttpClient::with_config(config.network.client_config())?;
        Ok(Self::with_http(http, &config.quay.api_url))
    }

    /// Returns the API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Builds the tag-listing URL for `image`.
    ///
    /// # Errors
    ///
    /// Returns `NotThisRegistry` if `image` does not start with [`IMAGE_PREFIX`].
    pub fn repository_url(&self, image: &str) -> Result<String> {
        let path = image
            .strip_prefix(IMAGE_PREFIX)
            .ok_or_else(|| RegistryError::not_this_registry(IMAGE_PREFIX, image))?;
        Ok(format!("{}/{}", self.api_url, path))
    }
}

#[async_trait]
impl ImageClient for QuayClient {
    fn name(&self) -> &str {
        "quay"
    }

    fn is_client(&self, image: &str) -> bool {
        image.starts_with(IMAGE_PREFIX)
    }

    async fn tags(&self, ctx: &Context, image: &str) -> Result<Vec<ImageTag>> {
        let url = self.repository_url(image)?;

        let body = self.http.get_bytes(ctx, &url).await?;

        let response: RepositoryResponse = serde_json::from_slice(&body)
            .map_err(|source| RegistryError::DecodeFailed {
                url: url.clone(),
                source,
            })?;

        let tags = map_tags(response.tags.unwrap_or_default()).inspect_err(|e| {
            warn!(image, error = %e, "rejecting tag list");
        })?;

        debug!(image, count = tags.len(), "fetched quay tags");
        Ok(tags)
    }
}

/// Converts every raw entry, failing on the first invalid one.
fn map_tags(raw: HashMap<String, RawTag>) -> Result<Vec<ImageTag>> {
    raw.into_iter()
        .map(|(tag, entry)| {
            let timestamp = parse_timestamp(&tag, entry.last_modified.as_deref().unwrap_or(""))?;
            let sha = parse_digest(entry.manifest_digest.as_deref().unwrap_or(""))?;
            Ok(ImageTag {
                tag,
                sha,
                timestamp,
            })
        })
        .collect()
}

/// Parses a quay last-modified value, keeping its offset.
///
/// The value must match [`TIMESTAMP_LAYOUT`] exactly: two-digit day and a
/// `[+-]hhmm` offset. The weekday must be a valid abbreviation but is not
/// checked against the date.
///
/// # Examples
///
/// ```
/// use libvc::quay::parse_timestamp;
///
/// let ts = parse_timestamp("v1", "Mon, 02 Jan 2006 15:04:05 -0700").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2006-01-02T15:04:05-07:00");
/// assert!(parse_timestamp("v1", "2006-01-02T15:04:05Z").is_err());
/// assert!(parse_timestamp("v1", "Mon, 02 Jan 2006 15:04:05 -07:00").is_err());
/// ```
pub fn parse_timestamp(tag: &str, value: &str) -> Result<DateTime<FixedOffset>> {
    let invalid = |reason: String, source: Option<chrono::ParseError>| {
        RegistryError::TimestampInvalid {
            tag: tag.to_string(),
            value: value.to_string(),
            reason,
            source,
        }
    };

    check_layout(value).map_err(|reason| invalid(reason.to_string(), None))?;

    DateTime::parse_from_str(&value[5..], DATE_FORMAT)
        .map_err(|source| invalid(source.to_string(), Some(source)))
}

/// Checks the fixed-width shape of [`TIMESTAMP_LAYOUT`] that chrono's
/// specifiers accept too loosely.
fn check_layout(value: &str) -> std::result::Result<(), &'static str> {
    if !value.is_ascii() || value.len() != TIMESTAMP_LAYOUT.len() {
        return Err("expected layout \"Mon, 02 Jan 2006 15:04:05 -0700\"");
    }

    if !WEEKDAYS.iter().any(|d| d.eq_ignore_ascii_case(&value[..3])) {
        return Err("unknown weekday");
    }

    let b = value.as_bytes();
    let digits = |range: std::ops::Range<usize>| b[range].iter().all(u8::is_ascii_digit);

    let separators = &b[3..5] == b", "
        && b[7] == b' '
        && b[11] == b' '
        && b[16] == b' '
        && b[19] == b':'
        && b[22] == b':'
        && b[25] == b' '
        && matches!(b[26], b'+' | b'-');

    let numbers = digits(5..7)
        && digits(12..16)
        && digits(17..19)
        && digits(20..22)
        && digits(23..25)
        && digits(27..31);

    if separators && numbers {
        Ok(())
    } else {
        Err("expected layout \"Mon, 02 Jan 2006 15:04:05 -0700\"")
    }
}
