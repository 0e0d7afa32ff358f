//! Gitee provider

use crate::blob::Blob;
use crate::client::ViewerOptions;
use crate::error::ViewError;
use crate::locator::SourceLocator;
use crate::mime::mime_for_path;
use crate::providers::{build_client, get_json, Provider};
use async_trait::async_trait;
use serde::Deserialize;

/// Public Gitee v5 API
pub const GITEE_API_BASE: &str = "https://gitee.com/api/v5";

/// Gitee contents API response (partial)
#[derive(Debug, Deserialize)]
struct GiteeContents {
    content: String,
    #[serde(default = "default_encoding")]
    encoding: String,
}

fn default_encoding() -> String {
    "base64".to_string()
}

/// Gitee provider
///
/// Single step: the contents API returns the whole file as base64, so
/// there is no size-based routing.
pub struct GiteeProvider;

impl GiteeProvider {
    /// Create a new Gitee provider
    pub fn new() -> Self {
        Self
    }
}

impl Default for GiteeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for GiteeProvider {
    fn name(&self) -> &'static str {
        "gitee"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("gitee")
    }

    async fn fetch(
        &self,
        locator: &SourceLocator,
        options: &ViewerOptions,
    ) -> Result<Blob, ViewError> {
        let client = build_client(options)?;
        let base = options
            .gitee_api_base
            .as_deref()
            .unwrap_or(GITEE_API_BASE)
            .trim_end_matches('/');

        let url = contents_url(base, locator);
        let contents: GiteeContents = get_json(&client, &url).await?;

        Blob::from_encoded(
            &contents.content,
            &contents.encoding,
            mime_for_path(locator.path()),
        )
    }
}

fn contents_url(base: &str, locator: &SourceLocator) -> String {
    format!(
        "{}/repos/{}/{}/contents/{}",
        base,
        locator.owner(),
        locator.repository(),
        locator.path()
    )
}
