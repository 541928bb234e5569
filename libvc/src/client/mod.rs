//! HTTP transport shared by registry clients.
//!
//! A thin wrapper over an async reqwest client. Clones share one connection
//! pool, so a single [`HttpClient`] can serve many concurrent requests. Every
//! request is bounded by the caller's [`Context`]; there are no retries.

use crate::context::Context;
use crate::error::{Result, RegistryError};
use reqwest::{Client as ReqwestClient, Response};
use std::time::Duration;
use tracing::debug;


/// Longest slice of an error body carried into a `FetchFailed` message.
const MAX_ERROR_BODY: usize = 512;

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libvc::client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_timeout(60)
///     .with_max_idle_per_host(20);
/// assert_eq!(config.timeout_seconds, Some(60));
/// assert_eq!(ClientConfig::new().timeout_seconds, None);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Hard per-request timeout in seconds (default: none). Requests are
    /// normally bounded by the caller's [`Context`] alone.
    pub timeout_seconds: Option<u64>,
    /// Maximum idle connections per host (default: 10)
    pub max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            max_idle_per_host: 10,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a hard per-request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Sets the maximum idle connections per host.
    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }
}

/// HTTP client for registry API calls.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http_client: ReqwestClient,
    timeout_seconds: Option<u64>,
}

impl HttpClient {
    /// Creates a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with a custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = ReqwestClient::builder().pool_max_idle_per_host(config.max_idle_per_host);
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let http_client = builder
            .build()
            .map_err(|e| RegistryError::config_with_source("Failed to create HTTP client", None, e))?;

        Ok(Self {
            http_client,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Issues one GET to `url` and returns the full response body.
    ///
    /// Sending the request and reading the body are both raced against `ctx`.
    ///
    /// # Errors
    ///
    /// Returns `FetchFailed` if the context is already done or becomes done
    /// before the body is read, the transport fails, or the registry answers
    /// with a non-success status.
    pub async fn get_bytes(&self, ctx: &Context, url: &str) -> Result<Vec<u8>> {
        debug!(url, "GET");

        let response = ctx
            .run(self.http_client.get(url).send())
            .await
            .map_err(|e| RegistryError::fetch_with_source(url, "request abandoned", e))?
            .map_err(|e| self.translate_reqwest_error(e, url))?;

        let response = Self::check_response_status(ctx, response, url).await?;

        let body = ctx
            .run(response.bytes())
            .await
            .map_err(|e| RegistryError::fetch_with_source(url, "response read abandoned", e))?
            .map_err(|e| RegistryError::fetch_with_source(url, "Failed to read response body", e))?;

        debug!(url, bytes = body.len(), "response received");
        Ok(body.to_vec())
    }

    /// Translates a reqwest error into a `FetchFailed`.
    fn translate_reqwest_error(&self, error: reqwest::Error, url: &str) -> RegistryError {
        let message = if error.is_timeout() {
            match self.timeout_seconds {
                Some(seconds) => format!("Request timed out after {} seconds", seconds),
                None => "Request timed out".to_string(),
            }
        } else if error.is_connect() {
            "Failed to connect to registry".to_string()
        } else if error.is_request() {
            "Failed to send request".to_string()
        } else {
            "Network error communicating with registry".to_string()
        };
        RegistryError::fetch_with_source(url, message, error)
    }

    /// Passes successful responses through and turns any other status into
    /// `FetchFailed`, carrying a truncated copy of the error body. If the
    /// context ends while that body is read, the context error is the source.
    async fn check_response_status(ctx: &Context, response: Response, url: &str) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = match ctx.run(response.text()).await {
            Ok(Ok(body)) => truncate(body, MAX_ERROR_BODY),
            Ok(Err(_)) => String::from("(unable to read response body)"),
            Err(e) => {
                return Err(RegistryError::FetchFailed {
                    url: url.to_string(),
                    status: Some(status.as_u16()),
                    message: format!("HTTP {}: error body read abandoned", status.as_u16()),
                    source: Some(Box::new(e)),
                });
            }
        };

        Err(RegistryError::fetch(
            url,
            Some(status.as_u16()),
            format!("HTTP {}: {}", status.as_u16(), error_body),
        ))
    }
}

fn truncate(mut s: String, max: usize) -> String {
    if s.len() > max {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
        s.push_str("...");
    }
    s
}
