use super::{BulkWriteReport, Document, DocumentStore, WriteFailure};
use crate::constants::STORE_ID_FIELD;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Document store that writes each collection as a timestamped pretty JSON
/// file under an output directory. Stands in for a remote document store
/// when running locally.
pub struct JsonFileStore {
    output_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<BulkWriteReport> {
        fs::create_dir_all(&self.output_dir)?;

        let mut report = BulkWriteReport::default();
        let mut writable = Vec::with_capacity(documents.len());
        for document in documents {
            let id = document
                .get(STORE_ID_FIELD)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            if id.is_empty() {
                report.failures.push(WriteFailure {
                    id,
                    reason: "document has no identifier".to_string(),
                });
            } else {
                report.inserted += 1;
                writable.push(document);
            }
        }

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{collection}_{timestamp}.json");
        let filepath = self.output_dir.join(&filename);
        let json_content = serde_json::to_string_pretty(&writable)?;
        fs::write(&filepath, json_content)?;

        info!(
            "Wrote {} document(s) to {}",
            report.inserted,
            filepath.display()
        );
        Ok(report)
    }
}
