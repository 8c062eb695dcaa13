use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Source of pages for the scraper.
///
/// Handles are cloned into every concurrent task, so implementations should
/// share their connection pool between clones.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch_text(&self, url: &Url) -> Result<String>;

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>>;
}

/// [`Fetch`] over HTTP. Cloning is cheap and reuses the same pool; the pool
/// is closed once the last clone is dropped.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn get(&self, url: &Url) -> Result<Response> {
        debug!(%url, "GET");
        let request_error = |source: reqwest::Error| Error::Request {
            url: url.to_string(),
            source,
        };
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn fetch_text(&self, url: &Url) -> Result<String> {
        self.get(url)
            .await?
            .text()
            .await
            .map_err(|source| Error::Request {
                url: url.to_string(),
                source,
            })
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        let bytes = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|source| Error::Request {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }
}
