//! Entry points for loading a blob
//!
//! The pipeline runs once and in order: location, target URL, provider,
//! fetch, render. Provider specifics live in [`providers`](crate::providers).

use crate::blob::Blob;
use crate::error::ViewError;
use crate::providers::ProviderRegistry;
use crate::render::{RenderKind, RenderSink};
use crate::viewer::Viewer;

/// Options that can be configured via the viewer builder
///
/// Unset base URLs fall back to the public endpoints.
#[derive(Debug, Clone, Default)]
pub struct ViewerOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// GitHub REST API base, e.g. `https://api.github.com`
    pub github_api_base: Option<String>,
    /// CDN mirror base, e.g. `https://cdn.jsdelivr.net`
    pub cdn_base: Option<String>,
    /// Gitee API base, e.g. `https://gitee.com/api/v5`
    pub gitee_api_base: Option<String>,
}

/// Fetch the file behind a blob view URL
pub async fn fetch_blob(url: &str, options: &ViewerOptions) -> Result<Blob, ViewError> {
    let registry = ProviderRegistry::with_defaults();
    registry.fetch_url(url, options).await
}

/// Load a location into the sink using the public endpoints
///
/// `location` is either a blob view URL or a hosting-page location that
/// carries one after `/#` or `/?`.
pub async fn load<S: RenderSink + ?Sized>(
    location: &str,
    sink: &mut S,
) -> Result<RenderKind, ViewError> {
    load_with_options(location, &ViewerOptions::default(), sink).await
}

/// Load a location into the sink with custom options
///
/// Same pipeline as [`Viewer::load`].
pub async fn load_with_options<S: RenderSink + ?Sized>(
    location: &str,
    options: &ViewerOptions,
    sink: &mut S,
) -> Result<RenderKind, ViewError> {
    Viewer::with_options(options.clone())
        .load(location, sink)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Document;

    #[tokio::test]
    async fn test_load_unsupported_host() {
        let mut document = Document::new();
        let result = load("https://example.com/o/r/blob/main/a.txt", &mut document).await;
        assert!(matches!(result, Err(ViewError::UnsupportedHost(_))));
        assert!(document.is_empty());
    }

    #[tokio::test]
    async fn test_load_parse_error_renders_nothing() {
        let mut document = Document::new();
        let result = load("https://viewer.example/#https://github.com/o/r", &mut document).await;
        assert!(matches!(result, Err(ViewError::UrlParse(url)) if url == "https://github.com/o/r"));
        assert!(document.is_empty());
    }

    #[test]
    fn test_viewer_options_default() {
        let options = ViewerOptions::default();
        assert!(options.user_agent.is_none());
        assert!(options.github_api_base.is_none());
        assert!(options.cdn_base.is_none());
        assert!(options.gitee_api_base.is_none());
    }
}
