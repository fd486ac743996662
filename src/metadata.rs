//! Typed package metadata and GitHub URL derivation.
//!
//! The solver stores package metadata as a loosely-typed mapping keyed by the
//! core-metadata field names (`Name`, `Version`, `Home-page`, `Project-URL`).
//! [`PackageMetadata::from_raw`] validates that mapping once at the store
//! boundary into named optional fields; downstream code never goes back to
//! string-keyed lookups.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Literal prefix a candidate URL must carry to be considered GitHub-hosted.
pub const GITHUB_URL_PREFIX: &str = "https://github.com";

static RE_NAME_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_.]+").unwrap());

/// Canonicalize a PyPI package name per PEP 503: runs of `-`, `_` and `.`
/// collapse to a single `-`, and the result is lowercased.
pub fn canonicalize_name(name: &str) -> String {
    RE_NAME_SEPARATORS.replace_all(name, "-").to_lowercase()
}

/// Package metadata extracted from the first dependency-tree entry.
#[derive(Debug, Clone, Default)]
pub struct PackageMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
    pub home_page: Option<String>,
    /// `Project-URL` entries, each a `"<label>, <url>"` string.
    pub project_urls: Vec<String>,
}

impl PackageMetadata {
    /// Extract the named fields from a raw metadata mapping. Absent or
    /// mistyped keys become `None`/empty rather than errors; completeness is
    /// judged by the caller.
    pub fn from_raw(raw: &serde_json::Value) -> Self {
        let field = |key: &str| raw.get(key).and_then(|v| v.as_str()).map(str::to_owned);

        let project_urls = raw
            .get("Project-URL")
            .and_then(|v| v.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: field("Name"),
            version: field("Version"),
            home_page: field("Home-page"),
            project_urls,
        }
    }

    /// Ordered candidate source URLs: the homepage first, then each
    /// `Project-URL` entry's field after the last comma, trimmed. Order and
    /// duplicates are preserved; empty candidates are kept and filtered by
    /// the caller's GitHub-prefix check.
    pub fn url_candidates(&self) -> Vec<String> {
        let mut candidates = vec![self.home_page.clone().unwrap_or_default()];
        for entry in &self.project_urls {
            let url = entry.rsplit(',').next().unwrap_or(entry).trim();
            candidates.push(url.to_string());
        }
        candidates
    }
}

/// A GitHub repository coordinate derived from a candidate URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRepo {
    pub organization: String,
    pub repository: String,
}

impl GithubRepo {
    /// Derive (organization, repository) from a GitHub URL.
    ///
    /// Returns `None` when the URL does not carry at least two path segments
    /// or cannot be parsed at all. The prefix check is the caller's job;
    /// this only looks at the path.
    pub fn from_url(url: &str) -> Option<Self> {
        let parsed = Url::parse(url).ok()?;
        let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
        let organization = segments.next()?.to_string();
        let repository = segments.next()?.to_string();
        Some(Self {
            organization,
            repository,
        })
    }
}
