//! Release-tag existence probing against GitHub.
//!
//! Uses `ureq` for synchronous HEAD requests. Probes are strictly sequential;
//! redirects are followed (ureq default) and only a final status of exactly
//! 200 counts as an existing release.

use crate::error::{ProbeError, ProbeResult};

/// Seam for release-tag existence checks, so aggregation can be exercised
/// without the network.
pub trait TagProbe {
    /// Whether `https://github.com/<org>/<repo>/releases/tag/<tag>` resolves
    /// with status 200.
    fn release_tag_exists(&self, org: &str, repo: &str, tag: &str) -> ProbeResult<bool>;
}

/// Probe backed by HEAD requests to github.com.
pub struct GithubProbe {
    agent: ureq::Agent,
}

impl GithubProbe {
    pub fn new() -> Self {
        // No explicit timeout: a probe blocks until the network stack gives up.
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Default for GithubProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// URL of the release-notes page for a tag.
pub fn release_tag_url(org: &str, repo: &str, tag: &str) -> String {
    format!("https://github.com/{org}/{repo}/releases/tag/{tag}")
}

impl TagProbe for GithubProbe {
    fn release_tag_exists(&self, org: &str, repo: &str, tag: &str) -> ProbeResult<bool> {
        let url = release_tag_url(org, repo, tag);
        match self.agent.head(&url).call() {
            Ok(response) => Ok(response.status() == 200),
            // 4xx/5xx means the tag does not exist; only transport-level
            // failures abort the run.
            Err(ureq::Error::Status(status, _)) => {
                tracing::debug!(%url, status, "No release at tag");
                Ok(false)
            }
            Err(ureq::Error::Transport(transport)) => Err(ProbeError::Transport {
                url,
                message: transport.to_string(),
            }),
        }
    }
}
