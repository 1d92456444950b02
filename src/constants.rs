/// Column name constants to ensure consistency across the codebase.
/// Source columns carry the exact names the export uses; derived columns
/// are introduced by the pipeline.

// Source columns
pub const COL_EMPLOYEE_ID: &str = "EmployeeID";
pub const COL_FIRST_NAME: &str = "FirstName";
pub const COL_LAST_NAME: &str = "LastName";
pub const COL_BIRTH_DATE: &str = "BirthDate";
pub const COL_SALARY: &str = "Salary";
pub const COL_DEPARTMENT: &str = "Department";

// Derived columns
pub const COL_FIRST_NAME_CLEANED: &str = "FirstNameCleaned";
pub const COL_FULL_NAME: &str = "FullName";
pub const COL_AGE: &str = "Age";
pub const COL_SALARY_BUCKET: &str = "SalaryBucket";

/// Identifier field expected by the document store; `EmployeeID` is renamed
/// to this on publish.
pub const STORE_ID_FIELD: &str = "_id";

/// Serialization of cleaned dates, and of the two fixed dates below.
pub const DATE_OUTPUT_FORMAT: &str = "%d/%m/%Y";

/// Fallback substituted for missing or unparseable birthdates.
pub const SENTINEL_BIRTHDATE: &str = "01/01/2023";

/// Fixed reference date ages are computed against.
pub const REFERENCE_DATE: &str = "01/01/2023";

/// Row position (0-based, after header-echo removal) of the one known-bad
/// export row whose fields were written into the wrong columns.
pub const SHIFTED_ROW_INDEX: usize = 29;

/// Default collection the cleaned records are published into.
pub const DEFAULT_COLLECTION: &str = "employee";
