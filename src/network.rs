//! Network fetch abstraction for the cache worker.

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::Result;

/// Abstraction over network fetches so the worker's routing logic can be
/// exercised without a live server.
#[async_trait]
pub trait NetworkFetch: Send + Sync {
    /// Fetches the body at `url`. Any transport or HTTP-status failure is an
    /// error; the worker decides whether a fallback applies.
    async fn fetch(&self, url: &Url) -> Result<Bytes>;
}

/// Default network implementation backed by reqwest.
#[derive(Debug, Clone, Default)]
pub struct HttpNetwork {
    client: reqwest::Client,
}

impl HttpNetwork {
    /// Creates a network layer with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a network layer reusing an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NetworkFetch for HttpNetwork {
    async fn fetch(&self, url: &Url) -> Result<Bytes> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?)
    }
}
