//! # gh-release-notes
//!
//! Construct prescriptions that link PyPI packages to their GitHub
//! release-notes pages, based on previously computed solver results.
//!
//! ## Pipeline
//!
//! - **Store** (`store`): typed, lazily iterated solver documents from a
//!   directory, filtered by an inclusive date window
//! - **Metadata** (`metadata`): PEP 503 name canonicalization and GitHub
//!   org/repo derivation from candidate URLs
//! - **Probe** (`probe`): sequential HEAD requests checking release tags,
//!   with and without a `v` prefix
//! - **Aggregator** (`aggregator`): one pass deduplicating on (name, version)
//!   and accumulating entries in discovery order
//! - **Prescription** (`prescription`): the fixed-envelope YAML output
//!
//! ## Library usage
//!
//! ```no_run
//! use gh_release_notes::aggregator::construct_prescription;
//! use gh_release_notes::probe::GithubProbe;
//! use gh_release_notes::store::SolverResultsStore;
//!
//! let store = SolverResultsStore::open("solver-results").unwrap();
//! let probe = GithubProbe::new();
//! let prescription = construct_prescription(&store, &probe, None, None).unwrap();
//! println!("{}", prescription.to_yaml().unwrap());
//! ```

pub mod aggregator;
pub mod error;
pub mod metadata;
pub mod prescription;
pub mod probe;
pub mod store;
