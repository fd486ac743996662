//! Rich diagnostic error types for the prescription aggregator.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so operators know exactly what went wrong
//! and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for a prescription run.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum NotesError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Output(#[from] OutputError),
}

// ---------------------------------------------------------------------------
// Solver-results store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("solver results directory {path} is not accessible")]
    #[diagnostic(
        code(gh_release_notes::store::open),
        help(
            "Check that the directory exists and is readable. Point the tool at the \
             solver results with --solver-results or GH_RELEASE_NOTES_SOLVER_RESULTS."
        )
    )]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read solver document {document_id}")]
    #[diagnostic(
        code(gh_release_notes::store::read),
        help("The document file could not be read. Check filesystem permissions.")
    )]
    Read {
        document_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to deserialize solver document {document_id}")]
    #[diagnostic(
        code(gh_release_notes::store::deserialize),
        help(
            "The document is not valid solver-result JSON. It may be truncated or \
             produced by an incompatible solver version."
        )
    )]
    Deserialize {
        document_id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// ---------------------------------------------------------------------------
// Release-tag probe errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ProbeError {
    #[error("transport failure probing {url}: {message}")]
    #[diagnostic(
        code(gh_release_notes::probe::transport),
        help(
            "A HEAD request to GitHub failed at the transport level. The run aborts \
             without partial output; fix connectivity and restart the date window."
        )
    )]
    Transport { url: String, message: String },
}

/// Result type for probe operations.
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

// ---------------------------------------------------------------------------
// Output errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum OutputError {
    #[error("failed to serialize prescription to YAML")]
    #[diagnostic(
        code(gh_release_notes::output::serialize),
        help("This indicates a bug in the prescription document types.")
    )]
    Serialize {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write prescription to {path}")]
    #[diagnostic(
        code(gh_release_notes::output::write),
        help("Check that the output path is writable and the disk is not full.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations.
pub type OutputResult<T> = std::result::Result<T, OutputError>;
