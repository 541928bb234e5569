//! The record and capability set shared by every registry client.

use crate::context::Context;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;


/// One published tag, normalized for cross-registry comparison.
///
/// The `sha` has always passed digest validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTag {
    /// Tag name as published by the registry.
    pub tag: String,
    /// Canonical `algorithm:hex` content digest.
    pub sha: String,
    /// Last-modified instant reported by the registry, in the registry's
    /// own offset. Comparisons are by instant.
    pub timestamp: DateTime<FixedOffset>,
}

/// Capability set every registry integration implements.
///
/// Clients are interchangeable: the caller asks [`ImageClient::is_client`]
/// on each registered client and hands the image to the first that accepts it.
#[async_trait]
pub trait ImageClient: Debug + Send + Sync {
    /// Short registry name used in logs.
    fn name(&self) -> &str;

    /// Returns true if this client serves `image`. Must be cheap and free of I/O.
    fn is_client(&self, image: &str) -> bool;

    /// Fetches every published tag of `image`.
    ///
    /// The returned order is unspecified. Either every tag is returned or the
    /// call fails; a partial list is never returned.
    async fn tags(&self, ctx: &Context, image: &str) -> Result<Vec<ImageTag>>;
}
