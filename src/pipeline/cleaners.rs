use crate::constants::{DATE_OUTPUT_FORMAT, SENTINEL_BIRTHDATE};
use crate::error::{EtlError, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not an ASCII or Latin-1 supplement letter.
static NON_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-zA-ZÀ-ÿ]+").unwrap());

/// ASCII and Latin-1 supplement letters, for stripping out of numeric text.
static LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new("[a-zA-ZÀ-ÿ]+").unwrap());

/// Anything that is not a digit or a sign, for the final numeric parse.
static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9+\-]+").unwrap());

/// Remove all whitespace from a value. Used on identifier and department
/// cells, which carry stray padding but no other defects.
pub fn strip_spaces(value: &str) -> String {
    value.split_whitespace().collect()
}

/// Clean a name cell: remove whitespace, then every character that is not
/// an ASCII or extended-Latin letter. Accented letters survive.
pub fn clean_name(value: &str) -> String {
    let no_spaces = strip_spaces(value);
    NON_LETTER.replace_all(&no_spaces, "").into_owned()
}

/// Parse a birthdate in the source serialization (`YYYY-MM-DD`, with the
/// slash-separated variant accepted too). `None` for missing or unparseable.
pub fn parse_birthdate(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y/%m/%d"))
        .ok()
}

/// Clean a birthdate cell to `DD/MM/YYYY`. Missing or unparseable values
/// become the sentinel date; this is a default-to-sentinel policy, not an
/// error, so downstream derivations always have a date to work with.
pub fn clean_birthdate(value: &str) -> String {
    match parse_birthdate(value) {
        Some(date) => date.format(DATE_OUTPUT_FORMAT).to_string(),
        None => SENTINEL_BIRTHDATE.to_string(),
    }
}

/// Clean a numeric cell: a missing value counts as zero, letters are
/// stripped, currency symbols and other non-numeric residue are dropped,
/// and the result is the absolute value of the remaining integer. A cell
/// with nothing parseable left is an error for the caller.
pub fn clean_number(value: &str) -> Result<i64> {
    let raw = if value.trim().is_empty() { "0" } else { value };
    let no_letters = LETTERS.replace_all(raw, "");
    let numeric = NON_NUMERIC.replace_all(&no_letters, "");
    let parsed: i64 = numeric.parse().map_err(|_| EtlError::Field {
        message: format!("value {value:?} is not numeric after letter removal"),
    })?;
    // i64::MIN has no positive counterpart, so a plain abs() would panic
    parsed.checked_abs().ok_or_else(|| EtlError::Field {
        message: format!("value {value:?} is out of range"),
    })
}
