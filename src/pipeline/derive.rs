use crate::constants::DATE_OUTPUT_FORMAT;
use crate::error::{EtlError, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static CAPITAL: Lazy<Regex> = Lazy::new(|| Regex::new("([A-Z])").unwrap());

/// Split a cleaned first name wherever an internal capital begins a new
/// token — a concatenated "JohnPaul" is two given names, not one.
pub fn split_given_names(first_name: &str) -> String {
    let spaced = CAPITAL.replace_all(first_name, " $1");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join the (possibly multi-token) first name and the last name into one
/// display string. When one side is empty the other stands alone.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    match (first_name.is_empty(), last_name.is_empty()) {
        (true, _) => last_name.trim().to_string(),
        (_, true) => first_name.trim().to_string(),
        _ => format!("{first_name} {last_name}"),
    }
}

/// Whole years between a cleaned `DD/MM/YYYY` birthdate and the reference
/// date: absolute day difference divided by 365, truncated. Leap years and
/// month alignment are deliberately ignored; the precision is acceptable
/// for bucketing employees by age.
pub fn age_on(birthdate: &str, reference: &str) -> Result<i64> {
    let birth = parse_output_date(birthdate)?;
    let reference = parse_output_date(reference)?;
    let days = (birth - reference).num_days().abs();
    Ok(days / 365)
}

fn parse_output_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_OUTPUT_FORMAT).map_err(|_| EtlError::Field {
        message: format!("date {value:?} is not in DD/MM/YYYY form"),
    })
}

/// Categorical bucket for a cleaned, non-negative salary. Zero means the
/// salary was missing upstream and gets no bucket.
pub fn salary_bucket(salary: i64) -> &'static str {
    match salary {
        s if s > 100_000 => "C",
        s if s >= 50_000 => "B",
        s if s > 0 => "A",
        _ => "",
    }
}
