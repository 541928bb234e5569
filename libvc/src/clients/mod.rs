//! Routing of image references to registry clients.
//!
//! A [`ClientSet`] holds every registered [`ImageClient`] and hands each image
//! to the first client that claims it.

use crate::api::{ImageClient, ImageTag};
use crate::config::Config;
use crate::context::Context;
use crate::error::{Result, RegistryError};
use crate::quay::QuayClient;
use std::sync::Arc;
use tracing::debug;

#[cfg(test)]
mod tests;

/// Ordered collection of registry clients.
#[derive(Debug, Default, Clone)]
pub struct ClientSet {
    clients: Vec<Arc<dyn ImageClient>>,
}

impl ClientSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set with every built-in client, configured from `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use libvc::{ClientSet, Config};
    ///
    /// let clients = ClientSet::from_config(&Config::default()).unwrap();
    /// assert!(clients.client_for("quay.io/org/image").is_some());
    /// assert!(clients.client_for("docker.io/library/alpine").is_none());
    /// ```
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut set = Self::new();
        set.register(QuayClient::from_config(config)?);
        Ok(set)
    }

    /// Adds a client. Earlier registrations win when several clients claim
    /// the same image.
    pub fn register<C: ImageClient + 'static>(&mut self, client: C) -> &mut Self {
        self.clients.push(Arc::new(client));
        self
    }

    /// Returns the first client whose `is_client` accepts `image`.
    pub fn client_for(&self, image: &str) -> Option<&dyn ImageClient> {
        self.clients
            .iter()
            .find(|c| c.is_client(image))
            .map(|c| c.as_ref())
    }

    /// Fetches the tags of `image` from the client that serves it.
    ///
    /// # Errors
    ///
    /// Returns `NoClient` if no registered client accepts `image`, otherwise
    /// whatever the selected client returns.
    pub async fn tags(&self, ctx: &Context, image: &str) -> Result<Vec<ImageTag>> {
        let client = self.client_for(image).ok_or_else(|| RegistryError::NoClient {
            image: image.to_string(),
        })?;
        debug!(image, client = client.name(), "routing image");
        client.tags(ctx, image).await
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
