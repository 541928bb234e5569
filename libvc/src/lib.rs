//! libvc - registry clients for container image version checking
//!
//! Each registry integration implements [`ImageClient`]: it decides from the
//! image reference alone whether it serves an image, and lists every
//! published tag of that image as an [`ImageTag`] (tag name, canonical content
//! digest, last-modified time) so tags from different registries can be
//! compared directly.
//!
//! # Quick Start
//!
//! ```no_run
//! use libvc::{ClientSet, Config, Context};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let clients = ClientSet::from_config(&Config::default())?;
//!     let ctx = Context::with_timeout(Duration::from_secs(30));
//!
//!     for tag in clients.tags(&ctx, "quay.io/jetstack/cert-manager-controller").await? {
//!         println!("{} {} {}", tag.tag, tag.sha, tag.timestamp);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Guarantees
//!
//! - Every returned digest has passed validation ([`digest::Digest`]).
//! - A tag list is all-or-nothing: one invalid entry fails the whole call.
//! - Tag order is unspecified.
//! - Each call issues at most one HTTP request, bounded by the [`Context`].

#![warn(clippy::all)]

/// Returns the libvc crate version.
///
/// # Examples
///
/// ```
/// let version = libvc::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use api::{ImageClient, ImageTag};
pub use clients::ClientSet;
pub use config::Config;
pub use context::{Context, ContextError};
pub use digest::{Digest, DigestAlgorithm, parse_digest};
pub use error::{RegistryError, Result};
pub use quay::QuayClient;

pub mod api;
pub mod client;
pub mod clients;
pub mod config;
pub mod context;
pub mod digest;
pub mod error;
pub mod quay;
