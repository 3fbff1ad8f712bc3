//! Combines CSV reports into one workbook.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::warn;
use rust_xlsxwriter::Workbook;

use crate::error::{ReorgError, ReorgResult};

/// Longest sheet name a workbook accepts.
const MAX_SHEET_NAME: usize = 31;

/// Writes every `*.csv` file in `dir`, sorted by file name, as one sheet of
/// the workbook at `path`. Sheets are named after the file stem and every
/// cell is written as text. Stems that collide once truncated get a `~N`
/// suffix.
///
/// Returns the sheet names in order.
///
/// # Errors
///
/// Returns [`ReorgError::Report`] if a CSV cannot be read or the workbook
/// cannot be written.
pub fn combine(dir: &Path, path: &Path) -> ReorgResult<Vec<String>> {
    let mut workbook = Workbook::new();
    let mut sheets = Vec::new();
    let mut used = HashSet::new();

    for csv_path in csv_files(dir)? {
        let name = sheet_name(&csv_path, &mut used);
        let worksheet = workbook
            .add_worksheet()
            .set_name(&name)
            .map_err(|e| ReorgError::Report(format!("Failed to create sheet '{name}': {e}")))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&csv_path)
            .map_err(|e| ReorgError::Report(format!("{}: {e}", csv_path.display())))?;

        for (row, record) in reader.records().enumerate() {
            let record =
                record.map_err(|e| ReorgError::Report(format!("{}: {e}", csv_path.display())))?;
            let row = u32::try_from(row)
                .map_err(|_| ReorgError::Report(format!("{}: too many rows", csv_path.display())))?;
            for (col, value) in record.iter().enumerate() {
                let col = u16::try_from(col).map_err(|_| {
                    ReorgError::Report(format!("{}: too many columns", csv_path.display()))
                })?;
                worksheet.write_string(row, col, value).map_err(|e| {
                    ReorgError::Report(format!("Failed to write cell in '{name}': {e}"))
                })?;
            }
        }
        sheets.push(name);
    }

    workbook.save(path).map_err(|e| {
        ReorgError::Report(format!("Failed to save workbook {}: {e}", path.display()))
    })?;
    Ok(sheets)
}

fn csv_files(dir: &Path) -> ReorgResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| ReorgError::Report(format!("Failed to list {}: {e}", dir.display())))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    files.sort();
    Ok(files)
}

/// Names a sheet after the file stem, cut to [`MAX_SHEET_NAME`] characters
/// and unique among `used`. Sheet names compare case-insensitively.
fn sheet_name(path: &Path, used: &mut HashSet<String>) -> String {
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let base: String = stem.chars().take(MAX_SHEET_NAME).collect();

    let mut name = base.clone();
    let mut n = 2;
    while !used.insert(name.to_lowercase()) {
        let suffix = format!("~{n}");
        let keep = MAX_SHEET_NAME - suffix.chars().count();
        name = base.chars().take(keep).chain(suffix.chars()).collect();
        n += 1;
    }
    if name != stem {
        warn!("Sheet for {} renamed to '{name}'", path.display());
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_auto, Data, Reader};

    #[test]
    fn every_csv_becomes_a_text_sheet() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b_roles.csv"), "roleName,count\nFinance,007\n").unwrap();
        std::fs::write(dir.path().join("a_people.csv"), "name\nJane\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let path = dir.path().join("combined.xlsx");

        let sheets = combine(dir.path(), &path).unwrap();
        assert_eq!(sheets, ["a_people", "b_roles"]);

        let mut workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names().to_vec(), ["a_people", "b_roles"]);
        let range = workbook.worksheet_range("b_roles").unwrap();
        assert_eq!(range.get_value((1, 1)), Some(&Data::String("007".into())));
    }

    #[test]
    fn long_file_stems_are_truncated() {
        let name = sheet_name(
            Path::new("reports/a_report_with_a_very_long_descriptive_name.csv"),
            &mut HashSet::new(),
        );
        assert_eq!(name, "a_report_with_a_very_long_descr");
        assert_eq!(name.chars().count(), MAX_SHEET_NAME);
    }

    #[test]
    fn colliding_truncated_stems_get_distinct_sheets() {
        let dir = tempfile::tempdir().unwrap();
        for quarter in ["q1", "q2", "q3"] {
            let file = format!("all_identities_entitlements_2024_{quarter}.csv");
            std::fs::write(dir.path().join(file), format!("quarter\n{quarter}\n")).unwrap();
        }
        let path = dir.path().join("combined.xlsx");

        let sheets = combine(dir.path(), &path).unwrap();
        assert_eq!(
            sheets,
            [
                "all_identities_entitlements_202",
                "all_identities_entitlements_2~2",
                "all_identities_entitlements_2~3",
            ]
        );

        let mut workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names().len(), 3);
        let range = workbook.worksheet_range("all_identities_entitlements_2~3").unwrap();
        assert_eq!(range.get_value((1, 0)), Some(&Data::String("q3".into())));
    }

    #[test]
    fn sheet_names_collide_case_insensitively() {
        let mut used = HashSet::new();
        assert_eq!(sheet_name(Path::new("Roles.csv"), &mut used), "Roles");
        assert_eq!(sheet_name(Path::new("roles.csv"), &mut used), "roles~2");
    }
}
