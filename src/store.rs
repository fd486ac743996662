//! Solver-results store boundary.
//!
//! Solver documents live as JSON files in a directory, one file per document;
//! the document id is the file stem. Documents are deserialized into a typed
//! envelope once at this boundary, so the rest of the crate never touches
//! string-keyed JSON beyond the raw package-metadata mapping.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{StoreError, StoreResult};

/// Timestamp format used by solver documents (`metadata.datetime`).
/// Only the leading calendar date takes part in window filtering.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Typed envelope of a stored solver result.
#[derive(Debug, Clone, Deserialize)]
pub struct SolverDocument {
    /// Document-level metadata written by the solver.
    #[serde(default)]
    pub metadata: DocumentMetadata,
    pub result: SolverResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentMetadata {
    /// ISO timestamp of the solver run, e.g. `2021-06-01T12:33:45.123456`.
    #[serde(default)]
    pub datetime: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolverResult {
    /// Resolved dependency tree; the first entry describes the package the
    /// solver was run for, later entries its transitive dependencies.
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub importlib_metadata: ImportlibMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportlibMetadata {
    /// Raw package metadata mapping (`Name`, `Version`, `Home-page`,
    /// `Project-URL`, ...). Field extraction happens in [`crate::metadata`].
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl SolverDocument {
    /// Calendar date of the solver run, when the document carries one.
    pub fn date(&self) -> Option<NaiveDate> {
        let datetime = self.metadata.datetime.as_deref()?;
        let prefix = datetime.get(..10)?;
        NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok()
    }
}

/// Directory-backed store of solver result documents.
pub struct SolverResultsStore {
    dir: PathBuf,
}

impl SolverResultsStore {
    /// Open the store rooted at `dir`. Fails if the directory cannot be listed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::read_dir(&dir).map_err(|source| StoreError::Open {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Lazily iterate `(document_id, document)` pairs within the inclusive
    /// date window. Either bound may be absent, meaning unbounded on that
    /// side. Documents without a timestamp are excluded whenever a bound is
    /// set, since their window membership cannot be established.
    ///
    /// Documents are yielded in directory-listing order; a read or
    /// deserialization failure surfaces as an `Err` item and is fatal to the
    /// consuming run.
    pub fn iterate_results(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> StoreResult<impl Iterator<Item = StoreResult<(String, SolverDocument)>> + use<>> {
        let entries = fs::read_dir(&self.dir).map_err(|source| StoreError::Open {
            path: self.dir.display().to_string(),
            source,
        })?;

        let iter = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(move |path| {
                let document_id = document_id_of(&path);
                let document = match load_document(&path, &document_id) {
                    Ok(document) => document,
                    Err(err) => return Some(Err(err)),
                };

                if !in_window(&document, &document_id, start_date, end_date) {
                    return None;
                }

                Some(Ok((document_id, document)))
            });

        Ok(iter)
    }
}

fn document_id_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn load_document(path: &Path, document_id: &str) -> StoreResult<SolverDocument> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
        document_id: document_id.to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| StoreError::Deserialize {
        document_id: document_id.to_string(),
        source,
    })
}

fn in_window(
    document: &SolverDocument,
    document_id: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> bool {
    if start_date.is_none() && end_date.is_none() {
        return true;
    }

    let Some(date) = document.date() else {
        tracing::debug!(
            document_id,
            "Excluding document without a timestamp from date-bounded listing"
        );
        return false;
    };

    if start_date.is_some_and(|start| date < start) {
        return false;
    }
    if end_date.is_some_and(|end| date > end) {
        return false;
    }
    true
}
