//! Reports derived from the identity snapshot.
//!
//! Every report is rebuilt from scratch on each export:
//!
//! - [`IDENTITY_ENTITLEMENTS_CSV`]: one row per identity, account and entitlement.
//! - [`ROLE_ENTITLEMENTS_CSV`]: one row per role and granted entitlement.
//! - [`WORKBOOK_XLSX`]: every CSV in the reports directory as one sheet.

pub mod identity_entitlements;
pub mod role_entitlements;
pub mod snapshot;
pub mod workbook;

use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::error::{ReorgError, ReorgResult};
use crate::model::Identity;
use crate::sources::SourceRegistry;

/// Per-identity entitlement table.
pub const IDENTITY_ENTITLEMENTS_CSV: &str = "all_identities_entitlements.csv";
/// Per-role entitlement table.
pub const ROLE_ENTITLEMENTS_CSV: &str = "all_roles_entitlements.csv";
/// Workbook combining every CSV report.
pub const WORKBOOK_XLSX: &str = "reorg_entitlements_roles.xlsx";

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Rows in the per-identity table.
    pub identity_rows: usize,
    /// Rows in the per-role table.
    pub role_rows: usize,
    /// Sheets in the workbook, in order.
    pub sheets: Vec<String>,
    /// Path of the workbook.
    pub workbook: PathBuf,
}

/// Writes both tables and the workbook into `reports_dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`ReorgError::Report`] if any file cannot be written.
pub fn export(
    identities: &[Identity],
    registry: &SourceRegistry,
    reports_dir: &Path,
) -> ReorgResult<ExportSummary> {
    std::fs::create_dir_all(reports_dir).map_err(|e| {
        ReorgError::Report(format!(
            "Failed to create reports directory {}: {e}",
            reports_dir.display()
        ))
    })?;

    let identity_path = reports_dir.join(IDENTITY_ENTITLEMENTS_CSV);
    let identity_rows = identity_entitlements::build_rows(identities, registry);
    write_rows(&identity_path, identity_entitlements::HEADER, &identity_rows)?;
    info!("Exported all entitlements to {}", identity_path.display());

    let role_path = reports_dir.join(ROLE_ENTITLEMENTS_CSV);
    let role_rows = role_entitlements::aggregate(identities);
    write_rows(&role_path, role_entitlements::HEADER, &role_rows)?;
    info!("Exported all unique roles and entitlements to {}", role_path.display());

    let workbook_path = reports_dir.join(WORKBOOK_XLSX);
    let sheets = workbook::combine(reports_dir, &workbook_path)?;
    info!("Combined all CSV files into {}", workbook_path.display());

    Ok(ExportSummary {
        identity_rows: identity_rows.len(),
        role_rows: role_rows.len(),
        sheets,
        workbook: workbook_path,
    })
}

/// Writes `header` and then one record per row, even when `rows` is empty.
fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> ReorgResult<()> {
    let report_error =
        |e: &dyn std::fmt::Display| ReorgError::Report(format!("{}: {e}", path.display()));

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| report_error(&e))?;
    writer.write_record(header).map_err(|e| report_error(&e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| report_error(&e))?;
    }
    writer.flush().map_err(|e| report_error(&e))
}
