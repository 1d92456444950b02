use crate::error::{EtlError, Result};
use serde_json::{Map, Value};

/// In-memory tabular batch: ordered column names plus string-valued rows.
/// All cells are strings until the pipeline derives typed columns.
#[derive(Debug, Clone)]
pub struct Table {
    /// Column names as the source file claims them, in file order.
    pub columns: Vec<String>,
    /// Each data row, one cell per column.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| EtlError::MissingColumn(name.to_string()))
    }

    /// Strip surrounding whitespace from every column name.
    pub fn trim_column_names(&mut self) {
        for column in &mut self.columns {
            *column = column.trim().to_string();
        }
    }

    pub fn get(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: String) {
        self.rows[row][col] = value;
    }

    /// Rewrite every cell of a column through an infallible cleaner.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&str) -> String,
    {
        let col = self.column_index(name)?;
        for row in &mut self.rows {
            row[col] = f(&row[col]);
        }
        Ok(())
    }

    /// Rewrite every cell of a column through a fallible cleaner,
    /// aborting on the first cell the cleaner rejects.
    pub fn try_map_column<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<String>,
    {
        let col = self.column_index(name)?;
        for row in &mut self.rows {
            row[col] = f(&row[col])?;
        }
        Ok(())
    }

    /// Collect the values of a column in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<String>> {
        let col = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[col].clone()).collect())
    }

    /// Append a new column; `values` must have one entry per row.
    pub fn add_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(EtlError::Field {
                message: format!(
                    "column {} has {} values for {} rows",
                    name,
                    values.len(),
                    self.rows.len()
                ),
            });
        }
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Remove the named columns and their cells from every row.
    pub fn drop_columns(&mut self, names: &[&str]) -> Result<()> {
        for name in names {
            let col = self.column_index(name)?;
            self.columns.remove(col);
            for row in &mut self.rows {
                row.remove(col);
            }
        }
        Ok(())
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        let col = self.column_index(from)?;
        self.columns[col] = to.to_string();
        Ok(())
    }

    /// Keep only rows matching the predicate, preserving order.
    pub fn retain_rows<F>(&mut self, mut pred: F)
    where
        F: FnMut(&[String]) -> bool,
    {
        self.rows.retain(|row| pred(row));
    }

    /// Convert each row to a field-name → value document. Columns listed in
    /// `int_columns` are emitted as JSON integers; everything else stays a
    /// string. A cell that fails to parse as an integer falls back to its
    /// string form rather than corrupting the document.
    pub fn to_documents(&self, int_columns: &[&str]) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(name, cell)| {
                        let value = if int_columns.contains(&name.as_str()) {
                            cell.parse::<i64>()
                                .map(Value::from)
                                .unwrap_or_else(|_| Value::from(cell.clone()))
                        } else {
                            Value::from(cell.clone())
                        };
                        (name.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(
            vec!["Id".to_string(), "Name".to_string()],
            vec![
                vec!["1".to_string(), "Ann".to_string()],
                vec!["2".to_string(), "Ben".to_string()],
            ],
        )
    }

    #[test]
    fn test_column_index_missing_column() {
        let table = sample_table();
        assert!(matches!(
            table.column_index("Nope"),
            Err(EtlError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_trim_column_names() {
        let mut table = Table::new(
            vec![" Id ".to_string(), "Name\t".to_string()],
            vec![],
        );
        table.trim_column_names();
        assert_eq!(table.columns, vec!["Id", "Name"]);
    }

    #[test]
    fn test_map_column_rewrites_cells() {
        let mut table = sample_table();
        table.map_column("Name", |v| v.to_uppercase()).unwrap();
        assert_eq!(table.get(0, 1), "ANN");
        assert_eq!(table.get(1, 1), "BEN");
    }

    #[test]
    fn test_add_column_length_mismatch() {
        let mut table = sample_table();
        let result = table.add_column("Extra", vec!["only-one".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_drop_columns_removes_cells() {
        let mut table = sample_table();
        table.drop_columns(&["Id"]).unwrap();
        assert_eq!(table.columns, vec!["Name"]);
        assert_eq!(table.rows[0], vec!["Ann"]);
    }

    #[test]
    fn test_to_documents_int_columns() {
        let table = sample_table();
        let docs = table.to_documents(&["Id"]);
        assert_eq!(docs[0]["Id"], serde_json::json!(1));
        assert_eq!(docs[0]["Name"], serde_json::json!("Ann"));
    }
}
