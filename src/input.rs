//! Reorg input file parsing.
//!
//! The file has a header row; data columns are read by position:
//!
//! | column | field |
//! |---|---|
//! | 0 | payroll id (the identity alias) |
//! | 3 | current department id |
//! | 4 | new department id |
//! | 5 | current team id |
//! | 6 | new team id |

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};

use crate::error::{ReorgError, ReorgResult};

const PAYROLL_ID: usize = 0;
const CURRENT_DEPARTMENT_ID: usize = 3;
const NEW_DEPARTMENT_ID: usize = 4;
const CURRENT_TEAM_ID: usize = 5;
const NEW_TEAM_ID: usize = 6;
const MIN_COLUMNS: usize = NEW_TEAM_ID + 1;

/// One employee's organizational change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorgRecord {
    /// 1-based line number in the input file.
    pub line: u64,
    /// Payroll id, used as the identity alias.
    pub payroll_id: String,
    /// Department before the change.
    pub current_department_id: String,
    /// Department after the change.
    pub new_department_id: String,
    /// Team before the change.
    pub current_team_id: String,
    /// Team after the change.
    pub new_team_id: String,
}

impl ReorgRecord {
    fn from_row(line: u64, row: &StringRecord) -> Option<Self> {
        if row.len() < MIN_COLUMNS {
            return None;
        }
        let column = |index: usize| row.get(index).unwrap_or_default().to_string();
        Some(Self {
            line,
            payroll_id: column(PAYROLL_ID),
            current_department_id: column(CURRENT_DEPARTMENT_ID),
            new_department_id: column(NEW_DEPARTMENT_ID),
            current_team_id: column(CURRENT_TEAM_ID),
            new_team_id: column(NEW_TEAM_ID),
        })
    }
}

/// Reads every record of the reorg file at `path`.
///
/// # Errors
///
/// Returns [`ReorgError::Input`] if the file cannot be opened or is not
/// valid CSV.
pub fn read_records(path: &Path) -> ReorgResult<Vec<ReorgRecord>> {
    let file = File::open(path).map_err(|e| {
        ReorgError::Input(format!("Failed to open reorg file {}: {e}", path.display()))
    })?;
    parse_records(file)
}

/// Parses reorg records from any reader.
///
/// Rows with fewer than seven columns are logged and skipped.
///
/// # Errors
///
/// Returns [`ReorgError::Input`] if the data is not valid CSV.
pub fn parse_records<R: Read>(reader: R) -> ReorgResult<Vec<ReorgRecord>> {
    let mut reader =
        ReaderBuilder::new().has_headers(true).flexible(true).trim(Trim::All).from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| ReorgError::Input(format!("Failed to read header row: {e}")))?
        .clone();
    info!("CSV Headers: {}", headers.iter().collect::<Vec<_>>().join(", "));

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ReorgError::Input(format!("Malformed reorg row: {e}")))?;
        let line = row.position().map_or(0, csv::Position::line);
        match ReorgRecord::from_row(line, &row) {
            Some(record) => records.push(record),
            None => warn!(
                "Skipping line {line}: expected at least {MIN_COLUMNS} columns, found {}",
                row.len()
            ),
        }
    }
    Ok(records)
}
