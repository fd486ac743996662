//! Output document types for the GitHub release-notes prescription.
//!
//! The envelope shape is fixed; only `run.release_notes` varies per run.

use serde::Serialize;

use crate::error::{OutputError, OutputResult};
use crate::metadata::{GithubRepo, canonicalize_name};

/// Index all recorded packages are resolved from.
pub const PYPI_INDEX_URL: &str = "https://pypi.org/simple";

const PRESCRIPTION_NAME: &str = "PyPIGitHubReleaseNotesWrap";
const PRESCRIPTION_TYPE: &str = "wrap.GitHubReleaseNotes";

/// The final prescription document.
#[derive(Debug, Serialize)]
pub struct Prescription {
    pub name: String,
    #[serde(rename = "type")]
    pub prescription_type: String,
    pub should_include: ShouldInclude,
    pub run: Run,
}

#[derive(Debug, Serialize)]
pub struct ShouldInclude {
    pub adviser_pipeline: bool,
}

#[derive(Debug, Serialize)]
pub struct Run {
    pub release_notes: Vec<ReleaseNotesEntry>,
}

/// One discovered release-notes mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseNotesEntry {
    pub organization: String,
    pub repository: String,
    pub package_version: PackageVersion,
    /// Present only when the `v`-prefixed tag matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_version_prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageVersion {
    pub name: String,
    pub version: String,
    pub index_url: String,
}

impl ReleaseNotesEntry {
    /// Build an entry for a discovered release. The package name is
    /// canonicalized and the version locked to an exact match.
    pub fn new(repo: &GithubRepo, name: &str, version: &str, has_v_prefix: bool) -> Self {
        Self {
            organization: repo.organization.clone(),
            repository: repo.repository.clone(),
            package_version: PackageVersion {
                name: canonicalize_name(name),
                version: format!("==={version}"),
                index_url: PYPI_INDEX_URL.to_string(),
            },
            tag_version_prefix: has_v_prefix.then(|| "v".to_string()),
        }
    }
}

impl Prescription {
    /// Wrap accumulated entries in the fixed envelope.
    pub fn new(release_notes: Vec<ReleaseNotesEntry>) -> Self {
        Self {
            name: PRESCRIPTION_NAME.to_string(),
            prescription_type: PRESCRIPTION_TYPE.to_string(),
            should_include: ShouldInclude {
                adviser_pipeline: true,
            },
            run: Run { release_notes },
        }
    }

    /// Render the document as YAML.
    pub fn to_yaml(&self) -> OutputResult<String> {
        serde_yaml::to_string(self).map_err(|source| OutputError::Serialize { source })
    }
}
