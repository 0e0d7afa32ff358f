//! Blob URL parsing
//!
//! A [`SourceLocator`] names one file in one branch of one repository. It is
//! derived from a browser-style "blob view" URL such as
//! `https://github.com/owner/repo/blob/main/docs/readme.md` and never changes
//! afterwards.

use crate::error::ViewError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `//<host>/<owner>/<repo>/blob/<branch>/<path>` with everything after the
/// branch kept as the path.
static BLOB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//.*?/(.*?)/(.*?)/blob/(.*?)/(.*?)$").expect("blob URL pattern is valid")
});

/// Hosting-page location carrying the target URL after `/?` or `/#`.
static PAGE_LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*?/[?#](.*?)$").expect("location pattern is valid"));

/// Location of a single file inside a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocator {
    owner: String,
    repository: String,
    branch: String,
    path: String,
}

impl SourceLocator {
    /// Build a locator from its parts
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        branch: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            branch: branch.into(),
            path: path.into(),
        }
    }

    /// Extract owner, repository, branch and path from a blob view URL
    ///
    /// No normalization or percent-decoding is applied. A URL that matches
    /// with an empty path is accepted; the fetch for it fails later.
    pub fn parse(url: &str) -> Result<Self, ViewError> {
        let caps = BLOB_URL
            .captures(url)
            .ok_or_else(|| ViewError::UrlParse(url.to_string()))?;

        Ok(Self::new(&caps[1], &caps[2], &caps[3], &caps[4]))
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Path of the file relative to the repository root
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Text after the last `.` of the path, if any
    pub fn extension(&self) -> Option<&str> {
        self.path.rsplit_once('.').map(|(_, ext)| ext)
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}@{}:{}",
            self.owner, self.repository, self.branch, self.path
        )
    }
}

/// Extract the target file URL from a hosting-page location
///
/// `https://viewer.example/#https://github.com/o/r/blob/main/a.png` yields
/// `https://github.com/o/r/blob/main/a.png`. The first `/?` or `/#` wins.
pub fn extract_target(location: &str) -> Option<&str> {
    PAGE_LOCATION
        .captures(location)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Target URL for a location, or the input itself if it carries none
pub fn resolve_target(input: &str) -> &str {
    extract_target(input).unwrap_or(input)
}
