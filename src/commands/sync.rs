//! `reorg-entitlements sync` command.

use std::path::{Path, PathBuf};

use log::{error, info};

use super::{runtime, service_context};
use crate::cli::OutputArgs;
use crate::error::{ReorgError, ReorgResult};
use crate::input;
use crate::pipeline::{self, RunSummary};
use crate::report::{self, snapshot, ExportSummary};
use crate::sources::SourceRegistry;

/// What a sync run produced.
#[derive(Debug)]
pub struct SyncOutcome {
    /// Run counts.
    pub summary: RunSummary,
    /// Reports written.
    pub export: ExportSummary,
    /// Session directory, when the run was recorded.
    pub recording: Option<PathBuf>,
}

/// Execute the `sync` command.
///
/// # Errors
///
/// Returns an error string if configuration, authentication, the input file
/// or any output fails.
pub fn run(input: &Path, output: &OutputArgs) -> Result<(), String> {
    let outcome = execute(input, output).map_err(|e| {
        error!("{e}");
        e.to_string()
    })?;

    if let Some(dir) = &outcome.recording {
        eprintln!("Recording saved to: {}", dir.display());
    }
    let summary = outcome.summary;
    println!(
        "Processed {} records: {} resolved, {} not found, {} mismatched",
        summary.records, summary.resolved, summary.unresolved, summary.mismatches
    );
    println!("Snapshot written to {}", output.snapshot.display());
    println!("Reports written to {}", output.reports.display());
    Ok(())
}

/// Runs the whole pipeline: service context, records, snapshot and reports.
///
/// # Errors
///
/// Returns the first fatal error.
pub fn execute(input: &Path, output: &OutputArgs) -> ReorgResult<SyncOutcome> {
    let registry = SourceRegistry::builtin();
    let runtime = runtime()?;

    let (run, recording) = runtime.block_on(async {
        let ctx = service_context().await?;
        let records = input::read_records(input)?;
        let run = pipeline::run(ctx.identity.as_ref(), &registry, &records).await;
        let recording = ctx.finish()?;
        Ok::<_, ReorgError>((run, recording))
    })?;

    snapshot::save(&run.identities, &output.snapshot)?;
    info!("Saved {} identities to {}", run.identities.len(), output.snapshot.display());

    info!("Starting export process...");
    let export = report::export(&run.identities, &registry, &output.reports)?;
    info!("Export process completed.");

    Ok(SyncOutcome { summary: run.summary, export, recording })
}
