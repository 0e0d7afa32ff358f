//! BlobView - view a single hosted repository file
//!
//! Given a browser-style blob URL such as
//! `https://github.com/owner/repo/blob/main/clip.mp4`, BlobView fetches the
//! file from GitHub or Gitee and renders it as one of four element kinds:
//! video, text, image, or a generic frame.
//!
//! ## Providers
//!
//! A [`ProviderRegistry`] picks the provider by sniffing the URL:
//! - [`GitHubProvider`] - jsDelivr CDN for files up to 50 MiB, git blob API above
//! - [`GiteeProvider`] - contents API
//!
//! ## Rendering
//!
//! Elements are appended to a caller-owned [`RenderSink`]. [`Document`]
//! collects them and can be written out as a standalone HTML page.

mod blob;
pub mod client;
mod error;
mod locator;
pub mod mime;
pub mod providers;
mod render;
mod viewer;

pub use blob::{decode_base64, Blob};
pub use client::{fetch_blob, load, load_with_options, ViewerOptions};
pub use error::ViewError;
pub use locator::{extract_target, resolve_target, SourceLocator};
pub use mime::{mime_for_path, DEFAULT_MIME};
pub use providers::{
    FetchStrategy, GitHubProvider, GiteeProvider, Provider, ProviderRegistry, TreeEntry,
    CDN_SIZE_LIMIT,
};
pub use render::{element_for, render, Document, Element, RenderKind, RenderSink, HLS_MIME};
pub use viewer::{LoadStatus, Viewer, ViewerBuilder};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "Everruns BlobView/1.0";
