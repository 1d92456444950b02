use crate::error::{EtlError, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolved run configuration. Values come from CLI flags first, then from
/// the environment (`.env` supported via dotenv), then from defaults.
#[derive(Debug, Clone)]
pub struct EtlConfig {
    /// Path to the source CSV export.
    pub input_path: PathBuf,
    /// Collection the cleaned records are published into.
    pub collection: String,
    /// Opaque store target. The pipeline never looks inside this; only the
    /// store factory interprets it.
    pub store_target: String,
}

impl EtlConfig {
    pub fn resolve(
        input: Option<PathBuf>,
        collection: Option<String>,
        credentials: Option<PathBuf>,
    ) -> Result<Self> {
        // Load .env if present; ignore a missing file
        let _ = dotenv::dotenv();

        let input_path = input
            .or_else(|| env::var("EMPLOYEE_ETL_INPUT").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("employee_details.csv"));

        let collection = collection
            .or_else(|| env::var("EMPLOYEE_ETL_COLLECTION").ok())
            .unwrap_or_else(|| crate::constants::DEFAULT_COLLECTION.to_string());

        let store_target = match credentials {
            Some(path) => load_credentials(path)?,
            None => env::var("EMPLOYEE_ETL_STORE").unwrap_or_else(|_| "output".to_string()),
        };

        Ok(Self {
            input_path,
            collection,
            store_target,
        })
    }
}

/// Read an opaque store connection token from a credentials file.
pub fn load_credentials<P: AsRef<Path>>(path: P) -> Result<String> {
    let token = fs::read_to_string(&path)?.trim().to_string();
    if token.is_empty() {
        return Err(EtlError::Config(format!(
            "credentials file {} is empty",
            path.as_ref().display()
        )));
    }
    info!("Store credentials obtained");
    Ok(token)
}
