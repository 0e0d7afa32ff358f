//! Hosting providers
//!
//! Design: each provider knows how to turn a [`SourceLocator`] into a
//! [`Blob`] for one hosting service. ProviderRegistry picks the first
//! provider whose `matches()` accepts the URL.

mod gitee;
mod github;

pub use gitee::GiteeProvider;
pub use github::{FetchStrategy, GitHubProvider, TreeEntry, CDN_SIZE_LIMIT};

use crate::blob::Blob;
use crate::client::ViewerOptions;
use crate::error::ViewError;
use crate::locator::SourceLocator;
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Connect timeout for every outbound request
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for file hosting providers
///
/// A provider declares which blob URLs it serves via `matches()` and
/// retrieves a single file via `fetch()`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Unique identifier for this provider (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Returns true if this provider should handle the given blob URL
    fn matches(&self, url: &str) -> bool;

    /// Fetch one file
    async fn fetch(
        &self,
        locator: &SourceLocator,
        options: &ViewerOptions,
    ) -> Result<Blob, ViewError>;
}

/// Ordered list of providers, selected by URL sniffing
pub struct ProviderRegistry {
    providers: Vec<Box<dyn Provider>>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with GitHub and Gitee, in that order
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(GitHubProvider::new()));
        registry.register(Box::new(GiteeProvider::new()));
        registry
    }

    /// Register a provider; earlier registrations win
    pub fn register(&mut self, provider: Box<dyn Provider>) {
        self.providers.push(provider);
    }

    /// First provider that accepts the URL
    pub fn select(&self, url: &str) -> Option<&dyn Provider> {
        self.providers
            .iter()
            .find(|provider| provider.matches(url))
            .map(|provider| &**provider)
    }

    /// Pick a provider for the URL, parse it and fetch the file
    pub async fn fetch_url(&self, url: &str, options: &ViewerOptions) -> Result<Blob, ViewError> {
        let provider = self
            .select(url)
            .ok_or_else(|| ViewError::UnsupportedHost(url.to_string()))?;
        let locator = SourceLocator::parse(url)?;

        tracing::debug!(provider = provider.name(), %locator, "Using provider");
        provider.fetch(&locator, options).await
    }
}

/// Build the HTTP client shared by one fetch
pub(crate) fn build_client(options: &ViewerOptions) -> Result<reqwest::Client, ViewError> {
    let mut headers = HeaderMap::new();
    let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(ViewError::ClientBuildError)
}

/// GET a JSON document
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, ViewError> {
    let response = send_get(client, url).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ViewError::InvalidResponse(format!("{}: {}", url, e)))
}

/// GET a binary body, returning its Content-Type alongside
pub(crate) async fn get_bytes(
    client: &reqwest::Client,
    url: &str,
) -> Result<(Option<String>, Bytes), ViewError> {
    let response = send_get(client, url).await?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ViewError::from_reqwest)?;
        body.extend_from_slice(&chunk);
    }

    Ok((content_type, Bytes::from(body)))
}

async fn send_get(client: &reqwest::Client, url: &str) -> Result<reqwest::Response, ViewError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(ViewError::from_reqwest)?;

    if !response.status().is_success() {
        return Err(ViewError::HttpStatus {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response)
}
