pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;

use crate::constants::{COL_AGE, COL_EMPLOYEE_ID, COL_SALARY, STORE_ID_FIELD};
use crate::error::Result;
use crate::table::Table;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, info};

/// A single record as the store sees it: field name → value.
pub type Document = Map<String, Value>;

/// One document the store refused to write.
#[derive(Debug, Clone, Serialize)]
pub struct WriteFailure {
    pub id: String,
    pub reason: String,
}

/// Outcome of a bulk insert. Failures are collected per document; the
/// batch as a whole is never rolled back.
#[derive(Debug, Default, Serialize)]
pub struct BulkWriteReport {
    pub inserted: usize,
    pub failures: Vec<WriteFailure>,
}

/// Store trait for publishing cleaned records as documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert every document into the named collection, keyed by the
    /// store identifier field. Per-document failures are reported, not
    /// raised; only batch-level I/O is an error.
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<BulkWriteReport>;
}

/// Build a store from an opaque connection target: `memory` selects the
/// in-memory store, anything else is a directory for the JSON-file store.
pub fn connect(target: &str) -> Arc<dyn DocumentStore> {
    match target {
        "memory" => Arc::new(InMemoryStore::new()),
        dir => Arc::new(JsonFileStore::new(dir)),
    }
}

/// Publish a cleaned table: rename the employee key to the store id field,
/// convert rows to documents, bulk-insert. At-most-once and best-effort —
/// write failures are logged and reported, never retried.
pub async fn publish(
    store: Arc<dyn DocumentStore>,
    table: &mut Table,
    collection: &str,
) -> Result<BulkWriteReport> {
    table.rename_column(COL_EMPLOYEE_ID, STORE_ID_FIELD)?;
    let documents = table.to_documents(&[COL_AGE, COL_SALARY]);
    let total = documents.len();

    let report = store.insert_many(collection, documents).await?;
    if report.failures.is_empty() {
        info!("Published {} document(s) to {}", report.inserted, collection);
    } else {
        error!(
            "Bulk write to {} reported {} failure(s) out of {}",
            collection,
            report.failures.len(),
            total
        );
    }
    Ok(report)
}
