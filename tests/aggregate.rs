//! End-to-end tests for prescription aggregation.
//!
//! These exercise the full pipeline from an on-disk solver-results store
//! through probing to the serialized YAML document, with a scripted probe
//! standing in for github.com.

use std::cell::RefCell;
use std::path::Path;

use gh_release_notes::aggregator::construct_prescription;
use gh_release_notes::error::ProbeResult;
use gh_release_notes::prescription::Prescription;
use gh_release_notes::probe::TagProbe;
use gh_release_notes::store::SolverResultsStore;

struct ScriptedProbe {
    existing: Vec<String>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedProbe {
    fn new(existing: &[&str]) -> Self {
        Self {
            existing: existing.iter().map(|s| s.to_string()).collect(),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl TagProbe for ScriptedProbe {
    fn release_tag_exists(&self, org: &str, repo: &str, tag: &str) -> ProbeResult<bool> {
        let key = format!("{org}/{repo}/{tag}");
        self.calls.borrow_mut().push(key.clone());
        Ok(self.existing.contains(&key))
    }
}

fn write_doc(dir: &Path, name: &str, datetime: &str, metadata: serde_json::Value) {
    let doc = serde_json::json!({
        "metadata": {"datetime": datetime},
        "result": {"tree": [{"importlib_metadata": {"metadata": metadata}}]},
    });
    std::fs::write(dir.join(name), doc.to_string()).unwrap();
}

fn aggregate(dir: &Path, probe: &ScriptedProbe) -> Prescription {
    let store = SolverResultsStore::open(dir).unwrap();
    construct_prescription(&store, probe, None, None).unwrap()
}

#[test]
fn requests_scenario_produces_single_entry() {
    let dir = tempfile::TempDir::new().unwrap();
    write_doc(
        dir.path(),
        "solver-rhel-8-py38-requests.json",
        "2021-06-01T10:00:00.000000",
        serde_json::json!({
            "Name": "Requests",
            "Version": "2.28.0",
            "Home-page": "https://github.com/psf/requests",
        }),
    );

    let probe = ScriptedProbe::new(&["psf/requests/2.28.0"]);
    let prescription = aggregate(dir.path(), &probe);

    let entries = &prescription.run.release_notes;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].organization, "psf");
    assert_eq!(entries[0].repository, "requests");
    assert_eq!(entries[0].package_version.name, "requests");
    assert_eq!(entries[0].package_version.version, "===2.28.0");
    assert_eq!(
        entries[0].package_version.index_url,
        "https://pypi.org/simple"
    );
    assert_eq!(entries[0].tag_version_prefix, None);

    let yaml = prescription.to_yaml().unwrap();
    assert!(yaml.contains("name: PyPIGitHubReleaseNotesWrap"));
    assert!(yaml.contains("type: wrap.GitHubReleaseNotes"));
    assert!(yaml.contains("adviser_pipeline: true"));
    assert!(!yaml.contains("tag_version_prefix"));
}

#[test]
fn v_prefixed_tag_is_recorded_with_prefix() {
    let dir = tempfile::TempDir::new().unwrap();
    write_doc(
        dir.path(),
        "doc.json",
        "2021-06-01T10:00:00.000000",
        serde_json::json!({
            "Name": "Flask_SQLAlchemy",
            "Version": "2.5.1",
            "Home-page": "https://github.com/pallets/flask-sqlalchemy",
        }),
    );

    let probe = ScriptedProbe::new(&["pallets/flask-sqlalchemy/v2.5.1"]);
    let prescription = aggregate(dir.path(), &probe);

    let entries = &prescription.run.release_notes;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].package_version.name, "flask-sqlalchemy");
    assert_eq!(entries[0].tag_version_prefix.as_deref(), Some("v"));
    assert!(
        prescription
            .to_yaml()
            .unwrap()
            .contains("tag_version_prefix: v")
    );
}

#[test]
fn duplicate_documents_probe_only_the_first() {
    let dir = tempfile::TempDir::new().unwrap();
    // Listing order follows the directory; name files so either order still
    // yields exactly one probed document.
    write_doc(
        dir.path(),
        "a.json",
        "2021-06-01T10:00:00.000000",
        serde_json::json!({
            "Name": "pkg",
            "Version": "1.0",
            "Home-page": "https://github.com/orga/repoa",
        }),
    );
    write_doc(
        dir.path(),
        "b.json",
        "2021-06-02T10:00:00.000000",
        serde_json::json!({
            "Name": "pkg",
            "Version": "1.0",
            "Home-page": "https://github.com/orgb/repob",
        }),
    );

    let probe = ScriptedProbe::new(&["orga/repoa/1.0", "orgb/repob/1.0"]);
    let prescription = aggregate(dir.path(), &probe);

    assert_eq!(prescription.run.release_notes.len(), 1);
    assert_eq!(probe.calls.borrow().len(), 1);
}

#[test]
fn non_github_hosted_package_contributes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    write_doc(
        dir.path(),
        "doc.json",
        "2021-06-01T10:00:00.000000",
        serde_json::json!({
            "Name": "pkg",
            "Version": "1.0",
            "Home-page": "https://gitlab.com/org/repo",
            "Project-URL": ["Documentation, https://pkg.readthedocs.io"],
        }),
    );

    let probe = ScriptedProbe::new(&[]);
    let prescription = aggregate(dir.path(), &probe);

    assert!(prescription.run.release_notes.is_empty());
    assert!(probe.calls.borrow().is_empty());
}

#[test]
fn date_window_restricts_processed_documents() {
    let dir = tempfile::TempDir::new().unwrap();
    write_doc(
        dir.path(),
        "early.json",
        "2021-05-01T10:00:00.000000",
        serde_json::json!({
            "Name": "early",
            "Version": "1.0",
            "Home-page": "https://github.com/a/a",
        }),
    );
    write_doc(
        dir.path(),
        "late.json",
        "2021-06-15T10:00:00.000000",
        serde_json::json!({
            "Name": "late",
            "Version": "2.0",
            "Home-page": "https://github.com/b/b",
        }),
    );

    let probe = ScriptedProbe::new(&["a/a/1.0", "b/b/2.0"]);
    let store = SolverResultsStore::open(dir.path()).unwrap();
    let start = chrono::NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
    let prescription = construct_prescription(&store, &probe, Some(start), None).unwrap();

    let entries = &prescription.run.release_notes;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].package_version.name, "late");
}
