//! The aggregation procedure: scan solver documents, probe GitHub for
//! matching release tags, and accumulate prescription entries.
//!
//! One pass, strictly sequential. Memory stays bounded to one document at a
//! time plus the accumulated entries and the in-run dedup set.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{NotesError, ProbeError, StoreResult};
use crate::metadata::{GITHUB_URL_PREFIX, GithubRepo, PackageMetadata};
use crate::prescription::{Prescription, ReleaseNotesEntry};
use crate::probe::{TagProbe, release_tag_url};
use crate::store::{SolverDocument, SolverResultsStore};

/// Construct the release-notes prescription from solver results within the
/// inclusive date window.
///
/// Probing stops for a package at its first successful tag match; packages
/// whose candidates all fail still count as processed and are never
/// re-attempted within the run. A transport failure aborts the whole run.
pub fn construct_prescription<P: TagProbe>(
    store: &SolverResultsStore,
    probe: &P,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Prescription, NotesError> {
    aggregate(store.iterate_results(start_date, end_date)?, probe)
}

fn aggregate<P: TagProbe>(
    documents: impl Iterator<Item = StoreResult<(String, SolverDocument)>>,
    probe: &P,
) -> Result<Prescription, NotesError> {
    let mut release_notes = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for item in documents {
        let (document_id, document) = item?;

        // The solver is run once per package, so the first tree entry is
        // authoritative; later entries describe transitive dependencies.
        let Some(first) = document.result.tree.first() else {
            continue;
        };

        tracing::debug!(document_id, "Processing solver document");

        let metadata = PackageMetadata::from_raw(&first.importlib_metadata.metadata);

        // Incomplete metadata: skip without touching the dedup set, so a
        // later complete record for the same package is still eligible.
        let Some(version) = metadata.version.clone() else {
            continue;
        };
        let Some(name) = metadata.name.clone() else {
            continue;
        };

        if !seen.insert((name.clone(), version.clone())) {
            continue;
        }

        if let Some(entry) = resolve_release_notes(&metadata, &name, &version, probe)? {
            release_notes.push(entry);
        }
    }

    Ok(Prescription::new(release_notes))
}

/// Resolve the release-notes entry for one package, scanning its candidate
/// URLs in order. Returns at the first successful probe; `None` when no
/// candidate yields an existing release tag.
fn resolve_release_notes<P: TagProbe>(
    metadata: &PackageMetadata,
    name: &str,
    version: &str,
    probe: &P,
) -> Result<Option<ReleaseNotesEntry>, ProbeError> {
    for url in metadata.url_candidates() {
        if url.is_empty() || !url.starts_with(GITHUB_URL_PREFIX) {
            tracing::debug!(%url, "Skipping URL as no link to GitHub repository found");
            continue;
        }

        let Some(repo) = GithubRepo::from_url(&url) else {
            tracing::warn!(
                %url,
                "Skipping URL as GitHub repository and organization cannot be parsed"
            );
            continue;
        };

        // Try without `v` prefix.
        if probe.release_tag_exists(&repo.organization, &repo.repository, version)? {
            tracing::info!(
                "Found GitHub release notes at {}",
                release_tag_url(&repo.organization, &repo.repository, version)
            );
            return Ok(Some(ReleaseNotesEntry::new(&repo, name, version, false)));
        }

        // Try with `v` prefix.
        let tag = format!("v{version}");
        if probe.release_tag_exists(&repo.organization, &repo.repository, &tag)? {
            tracing::info!(
                "Found GitHub release notes at {}",
                release_tag_url(&repo.organization, &repo.repository, &tag)
            );
            return Ok(Some(ReleaseNotesEntry::new(&repo, name, version, true)));
        }
    }

    Ok(None)
}
