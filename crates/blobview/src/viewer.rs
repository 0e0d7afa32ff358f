//! Viewer builder and load contract

use crate::blob::Blob;
use crate::client::{fetch_blob, ViewerOptions};
use crate::error::ViewError;
use crate::locator::resolve_target;
use crate::render::{render, RenderKind, RenderSink};
use serde::{Deserialize, Serialize};

/// Status update during a load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadStatus {
    /// Current phase ("resolve", "fetch", "render", "complete")
    pub phase: String,
    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoadStatus {
    /// Create a new status with phase
    pub fn new(phase: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            message: None,
        }
    }

    /// Set message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Builder for configuring a [`Viewer`]
#[derive(Debug, Clone, Default)]
pub struct ViewerBuilder {
    options: ViewerOptions,
}

impl ViewerBuilder {
    /// Create a new builder targeting the public endpoints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options.user_agent = Some(ua.into());
        self
    }

    /// Override the GitHub REST API base URL
    pub fn github_api_base(mut self, base: impl Into<String>) -> Self {
        self.options.github_api_base = Some(base.into());
        self
    }

    /// Override the CDN mirror base URL
    pub fn cdn_base(mut self, base: impl Into<String>) -> Self {
        self.options.cdn_base = Some(base.into());
        self
    }

    /// Override the Gitee API base URL
    pub fn gitee_api_base(mut self, base: impl Into<String>) -> Self {
        self.options.gitee_api_base = Some(base.into());
        self
    }

    /// Build the viewer
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
        }
    }
}

/// Configured viewer
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    options: ViewerOptions,
}

impl Viewer {
    /// Create a new viewer builder
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Create a viewer from ready-made options
    pub fn with_options(options: ViewerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Fetch the file behind a blob view URL without rendering it
    pub async fn fetch(&self, url: &str) -> Result<Blob, ViewError> {
        fetch_blob(url, &self.options).await
    }

    /// Fetch the file named by a location and render it into the sink
    pub async fn load<S: RenderSink + ?Sized>(
        &self,
        location: &str,
        sink: &mut S,
    ) -> Result<RenderKind, ViewError> {
        self.load_with_status(location, sink, |_| {}).await
    }

    /// Load with status updates
    pub async fn load_with_status<S, F>(
        &self,
        location: &str,
        sink: &mut S,
        mut status_callback: F,
    ) -> Result<RenderKind, ViewError>
    where
        S: RenderSink + ?Sized,
        F: FnMut(LoadStatus),
    {
        status_callback(LoadStatus::new("resolve").with_message(location));
        let target = resolve_target(location);
        tracing::debug!(url = %target, "Loading blob");

        status_callback(LoadStatus::new("fetch").with_message(target));
        let blob = self.fetch(target).await?;

        status_callback(LoadStatus::new("render").with_message(blob.mime_type()));
        let kind = render(&blob, sink);

        status_callback(LoadStatus::new("complete"));
        Ok(kind)
    }
}
