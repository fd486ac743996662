//! gh-release-notes CLI: aggregate GitHub release-notes prescriptions for
//! GitHub hosted projects on PyPI.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};

use gh_release_notes::aggregator::construct_prescription;
use gh_release_notes::error::OutputError;
use gh_release_notes::probe::GithubProbe;
use gh_release_notes::store::SolverResultsStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Parser)]
#[command(
    name = "gh-release-notes",
    version,
    about = "Aggregate GitHub release notes prescriptions for GitHub hosted projects on PyPI"
)]
struct Cli {
    /// Be verbose about what's going on.
    #[arg(short, long, env = "GH_RELEASE_NOTES_DEBUG")]
    verbose: bool,

    /// Use solver results starting the given date.
    #[arg(long, value_name = "YYYY-MM-DD", env = "GH_RELEASE_NOTES_START_DATE")]
    start_date: Option<String>,

    /// Upper bound for solver results listing.
    #[arg(long, value_name = "YYYY-MM-DD", env = "GH_RELEASE_NOTES_END_DATE")]
    end_date: Option<String>,

    /// Store result to a file or print to stdout (-).
    #[arg(long, value_name = "FILE", env = "GH_RELEASE_NOTES_OUTPUT")]
    output: Option<String>,

    /// Directory holding solver result documents.
    #[arg(
        long,
        value_name = "DIR",
        env = "GH_RELEASE_NOTES_SOLVER_RESULTS",
        default_value = "solver-results"
    )]
    solver_results: PathBuf,
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid date {value:?}, expected YYYY-MM-DD"))
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    tracing::debug!("Debug mode is on");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Date-parse failures are fatal before any document is touched.
    let start_date = cli.start_date.as_deref().map(parse_date).transpose()?;
    let end_date = cli.end_date.as_deref().map(parse_date).transpose()?;

    let store = SolverResultsStore::open(&cli.solver_results)?;
    let probe = GithubProbe::new();

    let prescription = construct_prescription(&store, &probe, start_date, end_date)?;
    let yaml = prescription.to_yaml()?;

    match cli.output.as_deref() {
        None | Some("-") => print!("{yaml}"),
        Some(path) => {
            fs::write(path, &yaml).map_err(|source| OutputError::Write {
                path: path.to_string(),
                source,
            })?;
            tracing::info!("Prescription written to {path}");
        }
    }

    Ok(())
}
