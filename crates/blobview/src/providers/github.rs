//! GitHub provider
//!
//! Small and medium files come from the jsDelivr mirror, which is fast but
//! capped at 50 MiB and may serve stale copies. Larger files are read from
//! the git blob API by content hash. The tree listing that supplies size and
//! hash is best effort: if it fails the CDN is tried anyway.

use crate::blob::Blob;
use crate::client::ViewerOptions;
use crate::error::ViewError;
use crate::locator::SourceLocator;
use crate::mime::{essence, mime_for_path};
use crate::providers::{build_client, get_bytes, get_json, Provider};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Largest file the CDN mirror will serve (50 MiB)
pub const CDN_SIZE_LIMIT: u64 = 50 * 1024 * 1024;

/// Public GitHub REST API
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Public jsDelivr CDN
pub const CDN_BASE: &str = "https://cdn.jsdelivr.net";

/// One entry of a recursive tree listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    /// Absent for directories and submodules
    #[serde(default)]
    pub size: Option<u64>,
    pub sha: String,
}

/// GitHub API tree response (partial)
#[derive(Debug, Deserialize)]
struct TreeListing {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

/// GitHub API blob response (partial)
#[derive(Debug, Deserialize)]
struct GitBlob {
    content: String,
    #[serde(default = "default_encoding")]
    encoding: String,
}

fn default_encoding() -> String {
    "base64".to_string()
}

/// How a GitHub file is retrieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Raw bytes from the CDN mirror
    Cdn,
    /// Base64 payload from the git blob API
    Api { sha: String },
}

impl FetchStrategy {
    /// Pick the API only when the file is known to exceed the CDN limit
    pub fn choose(entry: Option<&TreeEntry>) -> Self {
        match entry {
            Some(TreeEntry {
                size: Some(size),
                sha,
                ..
            }) if *size > CDN_SIZE_LIMIT => FetchStrategy::Api { sha: sha.clone() },
            _ => FetchStrategy::Cdn,
        }
    }
}

/// GitHub provider
///
/// Matches any blob URL containing `github`.
pub struct GitHubProvider;

impl GitHubProvider {
    /// Create a new GitHub provider
    pub fn new() -> Self {
        Self
    }

    /// Find the listing entry for the locator's path
    ///
    /// `Ok(None)` means the listing loaded but has no such path.
    pub async fn find_tree_entry(
        client: &reqwest::Client,
        options: &ViewerOptions,
        locator: &SourceLocator,
    ) -> Result<Option<TreeEntry>, ViewError> {
        let url = tree_url(api_base(options), locator);
        let listing: TreeListing = get_json(client, &url).await?;

        let entry = listing
            .tree
            .into_iter()
            .find(|entry| entry.path == locator.path());

        if entry.is_none() && listing.truncated {
            warn!(%locator, "Tree listing truncated before the requested path");
        }

        Ok(entry)
    }

    /// Tree entry for the locator, or `None` if the lookup failed
    pub async fn lookup_metadata(
        client: &reqwest::Client,
        options: &ViewerOptions,
        locator: &SourceLocator,
    ) -> Option<TreeEntry> {
        match Self::find_tree_entry(client, options, locator).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!(%locator, error = %e, "Failed to read tree listing, falling back to CDN");
                None
            }
        }
    }

    async fn fetch_from_cdn(
        client: &reqwest::Client,
        options: &ViewerOptions,
        locator: &SourceLocator,
    ) -> Result<Blob, ViewError> {
        let url = cdn_url(cdn_base(options), locator);
        let (content_type, bytes) = get_bytes(client, &url).await?;

        let mime_type = content_type
            .as_deref()
            .map(essence)
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| mime_for_path(locator.path()));

        Ok(Blob::from_cdn(bytes, mime_type, url))
    }

    async fn fetch_from_api(
        client: &reqwest::Client,
        options: &ViewerOptions,
        locator: &SourceLocator,
        sha: &str,
    ) -> Result<Blob, ViewError> {
        let url = blob_url(api_base(options), locator, sha);
        let blob: GitBlob = get_json(client, &url).await?;

        Blob::from_encoded(&blob.content, &blob.encoding, mime_for_path(locator.path()))
    }
}

impl Default for GitHubProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for GitHubProvider {
    fn name(&self) -> &'static str {
        "github"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("github")
    }

    async fn fetch(
        &self,
        locator: &SourceLocator,
        options: &ViewerOptions,
    ) -> Result<Blob, ViewError> {
        let client = build_client(options)?;

        let entry = Self::lookup_metadata(&client, options, locator).await;
        let strategy = FetchStrategy::choose(entry.as_ref());
        debug!(%locator, ?strategy, size = ?entry.as_ref().and_then(|e| e.size), "Fetching from GitHub");

        match strategy {
            FetchStrategy::Cdn => Self::fetch_from_cdn(&client, options, locator).await,
            FetchStrategy::Api { sha } => {
                Self::fetch_from_api(&client, options, locator, &sha).await
            }
        }
    }
}

fn api_base(options: &ViewerOptions) -> &str {
    options
        .github_api_base
        .as_deref()
        .unwrap_or(GITHUB_API_BASE)
        .trim_end_matches('/')
}

fn cdn_base(options: &ViewerOptions) -> &str {
    options
        .cdn_base
        .as_deref()
        .unwrap_or(CDN_BASE)
        .trim_end_matches('/')
}

fn tree_url(base: &str, locator: &SourceLocator) -> String {
    format!(
        "{}/repos/{}/{}/git/trees/{}?recursive=1",
        base,
        locator.owner(),
        locator.repository(),
        locator.branch()
    )
}

fn blob_url(base: &str, locator: &SourceLocator, sha: &str) -> String {
    format!(
        "{}/repos/{}/{}/git/blobs/{}",
        base,
        locator.owner(),
        locator.repository(),
        sha
    )
}

fn cdn_url(base: &str, locator: &SourceLocator) -> String {
    format!(
        "{}/gh/{}/{}@{}/{}",
        base,
        locator.owner(),
        locator.repository(),
        locator.branch(),
        locator.path()
    )
}
