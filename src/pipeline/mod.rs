// Transformation pipeline: structural repair, field cleaning, derivation

pub mod cleaners;
pub mod derive;
pub mod repair;

use crate::constants::{
    COL_AGE, COL_BIRTH_DATE, COL_DEPARTMENT, COL_EMPLOYEE_ID, COL_FIRST_NAME,
    COL_FIRST_NAME_CLEANED, COL_FULL_NAME, COL_LAST_NAME, COL_SALARY, COL_SALARY_BUCKET,
    DATE_OUTPUT_FORMAT, REFERENCE_DATE, SENTINEL_BIRTHDATE,
};
use crate::error::{EtlError, Result};
use crate::table::Table;
use serde::Serialize;
use tracing::{info, warn};

/// Result of a complete transform run.
#[derive(Debug, Serialize)]
pub struct TransformReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub header_echoes_removed: usize,
    pub shift_repair_applied: bool,
    /// Birthdates that were missing or unparseable and got the sentinel.
    pub birthdate_defaults: usize,
}

/// Run the full transformation over a raw employee batch. Stage order is
/// fixed: each stage consumes the exact column names and values the prior
/// stage leaves behind (age derivation reads the cleaned, reformatted
/// birthdate, not the raw one).
pub fn transform(table: &mut Table) -> Result<TransformReport> {
    let rows_in = table.rows.len();

    // Stage 1: structural repair and column-name trimming
    let repair_report = repair::repair(table)?;

    // Stage 2: identifier and department whitespace
    table.map_column(COL_EMPLOYEE_ID, |v| cleaners::strip_spaces(v))?;
    table.map_column(COL_DEPARTMENT, |v| cleaners::strip_spaces(v))?;

    // Stage 3: birthdates, counting every sentinel substitution
    let mut birthdate_defaults = 0;
    table.map_column(COL_BIRTH_DATE, |raw| match cleaners::parse_birthdate(raw) {
        Some(date) => date.format(DATE_OUTPUT_FORMAT).to_string(),
        None => {
            birthdate_defaults += 1;
            SENTINEL_BIRTHDATE.to_string()
        }
    })?;
    if birthdate_defaults > 0 {
        warn!(
            "Substituted sentinel birthdate for {} row(s)",
            birthdate_defaults
        );
    }
    info!("Cleaning complete");

    // Stage 4: name columns
    table.map_column(COL_FIRST_NAME, |v| cleaners::clean_name(v))?;
    table.map_column(COL_LAST_NAME, |v| cleaners::clean_name(v))?;

    // Stage 5: full name (drops the raw first name, keeps the split form
    // as an intermediate)
    let split_names: Vec<String> = table
        .column_values(COL_FIRST_NAME)?
        .iter()
        .map(|v| derive::split_given_names(v))
        .collect();
    table.add_column(COL_FIRST_NAME_CLEANED, split_names)?;
    table.drop_columns(&[COL_FIRST_NAME])?;

    let first_names = table.column_values(COL_FIRST_NAME_CLEANED)?;
    let last_names = table.column_values(COL_LAST_NAME)?;
    let full_names = first_names
        .iter()
        .zip(&last_names)
        .map(|(first, last)| derive::full_name(first, last))
        .collect();
    table.add_column(COL_FULL_NAME, full_names)?;
    info!("Full name column created");

    // Stage 6: age from the cleaned birthdate
    let mut ages = Vec::with_capacity(table.rows.len());
    for birthdate in table.column_values(COL_BIRTH_DATE)? {
        ages.push(derive::age_on(&birthdate, REFERENCE_DATE)?.to_string());
    }
    table.add_column(COL_AGE, ages)?;
    info!("Employee age column created");

    // Stage 7: salary
    table.try_map_column(COL_SALARY, |raw| {
        cleaners::clean_number(raw).map(|n| n.to_string())
    })?;

    // Stage 8: salary bucket
    let mut buckets = Vec::with_capacity(table.rows.len());
    for salary in table.column_values(COL_SALARY)? {
        let salary: i64 = salary.parse().map_err(|_| EtlError::Field {
            message: format!("cleaned salary {salary:?} is not an integer"),
        })?;
        buckets.push(derive::salary_bucket(salary).to_string());
    }
    table.add_column(COL_SALARY_BUCKET, buckets)?;
    info!("Salary bucket column created");

    // Stage 9: drop intermediate-only columns
    table.drop_columns(&[COL_FIRST_NAME_CLEANED, COL_LAST_NAME, COL_BIRTH_DATE])?;

    Ok(TransformReport {
        rows_in,
        rows_out: table.rows.len(),
        header_echoes_removed: repair_report.header_echoes_removed,
        shift_repair_applied: repair_report.shift_repair_applied,
        birthdate_defaults,
    })
}
