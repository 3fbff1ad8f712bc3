//! `reorg-entitlements export` command.

use log::{error, info};

use crate::cli::OutputArgs;
use crate::error::ReorgResult;
use crate::report::{self, snapshot, ExportSummary};
use crate::sources::SourceRegistry;

/// Execute the `export` command.
///
/// # Errors
///
/// Returns an error string if the snapshot cannot be read or a report
/// cannot be written.
pub fn run(output: &OutputArgs) -> Result<(), String> {
    let summary = execute(output).map_err(|e| {
        error!("{e}");
        e.to_string()
    })?;
    println!(
        "Exported {} entitlement rows and {} role rows to {}",
        summary.identity_rows,
        summary.role_rows,
        summary.workbook.display()
    );
    Ok(())
}

/// Rebuilds the reports from the snapshot alone.
///
/// # Errors
///
/// Returns the first fatal error.
pub fn execute(output: &OutputArgs) -> ReorgResult<ExportSummary> {
    let identities = snapshot::load(&output.snapshot)?;
    info!("Loaded {} identities from {}", identities.len(), output.snapshot.display());
    report::export(&identities, &SourceRegistry::builtin(), &output.reports)
}
