//! Error types for registry clients.
//!
//! Every failure is returned to the caller with the offending value and, where
//! one exists, the underlying cause. Nothing here is fatal to the process; the
//! caller decides whether to skip the registry, retry, or abort.

use crate::context::ContextError;
use thiserror::Error;


/// Main error type for registry client operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The image reference belongs to a different registry
    #[error("image does not have {prefix:?} prefix: {image}")]
    NotThisRegistry { prefix: String, image: String },

    /// No registered client accepts the image reference
    #[error("no registry client for image: {image}")]
    NoClient { image: String },

    /// Transport errors, non-success statuses and context cancellation
    #[error("Failed to fetch {url}: {message}")]
    FetchFailed {
        url: String,
        status: Option<u16>,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Response body is not the expected JSON shape
    #[error("Failed to decode response from {url}: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A tag's last-modified value does not match the registry's format
    #[error("Invalid timestamp {value:?} for tag {tag:?}: {reason}")]
    TimestampInvalid {
        tag: String,
        value: String,
        reason: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// Digest has the wrong shape, length or charset
    #[error("Malformed digest {digest:?}: {reason}")]
    MalformedDigest { digest: String, reason: String },

    /// Digest algorithm is not one of the known algorithms
    #[error("Unsupported digest algorithm {algorithm:?} in {digest:?}")]
    UnsupportedAlgorithm { algorithm: String, digest: String },

    /// Configuration errors (invalid config file, bad values)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for registry client operations
pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    /// Creates a new not-this-registry error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libvc::error::RegistryError;
    ///
    /// let err = RegistryError::not_this_registry("quay.io/", "docker.io/library/alpine");
    /// assert!(matches!(err, RegistryError::NotThisRegistry { .. }));
    /// ```
    pub fn not_this_registry<P: Into<String>, I: Into<String>>(prefix: P, image: I) -> Self {
        Self::NotThisRegistry {
            prefix: prefix.into(),
            image: image.into(),
        }
    }

    /// Creates a new fetch error without an underlying cause.
    ///
    /// # Examples
    ///
    /// ```
    /// use libvc::error::RegistryError;
    ///
    /// let err = RegistryError::fetch("https://quay.io/api/v1/repository/x", Some(502), "bad gateway");
    /// assert_eq!(err.status_code(), Some(502));
    /// ```
    pub fn fetch<U: Into<String>, M: Into<String>>(url: U, status: Option<u16>, message: M) -> Self {
        Self::FetchFailed {
            url: url.into(),
            status,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new fetch error wrapping the underlying cause.
    pub fn fetch_with_source<U, M, E>(url: U, message: M, source: E) -> Self
    where
        U: Into<String>,
        M: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::FetchFailed {
            url: url.into(),
            status: None,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new malformed digest error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libvc::error::RegistryError;
    ///
    /// let err = RegistryError::malformed_digest("sha256:xyz", "hash must be 64 characters");
    /// assert!(matches!(err, RegistryError::MalformedDigest { .. }));
    /// ```
    pub fn malformed_digest<D: Into<String>, R: Into<String>>(digest: D, reason: R) -> Self {
        Self::MalformedDigest {
            digest: digest.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new unsupported algorithm error.
    pub fn unsupported_algorithm<A: Into<String>, D: Into<String>>(algorithm: A, digest: D) -> Self {
        Self::UnsupportedAlgorithm {
            algorithm: algorithm.into(),
            digest: digest.into(),
        }
    }

    /// Creates a new configuration error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libvc::error::RegistryError;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    /// let err = RegistryError::config_with_source("failed to read config", Some("/etc/vc.yaml"), io_err);
    /// assert!(matches!(err, RegistryError::Config { .. }));
    /// ```
    pub fn config_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the context error behind a `FetchFailed`, if the fetch was
    /// abandoned because the caller's context was cancelled or expired.
    pub fn context_error(&self) -> Option<&ContextError> {
        match self {
            Self::FetchFailed {
                source: Some(source),
                ..
            } => source.downcast_ref::<ContextError>(),
            _ => None,
        }
    }

    /// Returns true when the error was caused by cancellation or a passed deadline.
    pub fn is_cancelled(&self) -> bool {
        self.context_error().is_some()
    }

    /// Returns the HTTP status of a failed fetch, if the registry answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::FetchFailed { status, .. } => *status,
            _ => None,
        }
    }
}
