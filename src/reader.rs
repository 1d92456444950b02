use crate::error::Result;
use crate::table::Table;
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Read a CSV file (header row present, every cell a string) into a `Table`.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    info!("Reading CSV from {}", path.as_ref().display());

    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        // Short rows from a flexible read are padded so every row matches
        // the header width.
        row.resize(columns.len(), String::new());
        rows.push(row);
    }

    info!("Loaded {} rows across {} columns", rows.len(), columns.len());
    Ok(Table::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_csv_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "EmployeeID,FirstName").unwrap();
        writeln!(file, "1001,Alice").unwrap();
        writeln!(file, "1002,Bob").unwrap();
        drop(file);

        let table = read_csv(&path).unwrap();
        assert_eq!(table.columns, vec!["EmployeeID", "FirstName"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.get(1, 1), "Bob");
    }

    #[test]
    fn test_read_csv_pads_short_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "A,B,C").unwrap();
        writeln!(file, "1,2").unwrap();
        drop(file);

        let table = read_csv(&path).unwrap();
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
    }
}
