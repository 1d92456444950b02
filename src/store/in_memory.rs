use super::{BulkWriteReport, Document, DocumentStore, WriteFailure};
use crate::constants::STORE_ID_FIELD;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// In-memory store implementation for development/testing. Duplicate
/// identifiers are write failures, matching document-store semantics.
pub struct InMemoryStore {
    collections: Arc<Mutex<HashMap<String, HashMap<String, Document>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            collections: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Fetch a document by id, for assertions in tests.
    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        let collections = self.collections.lock().unwrap();
        collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    pub fn count(&self, collection: &str) -> usize {
        let collections = self.collections.lock().unwrap();
        collections.get(collection).map_or(0, |docs| docs.len())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<BulkWriteReport> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();

        let mut report = BulkWriteReport::default();
        for document in documents {
            let id = match document.get(STORE_ID_FIELD).and_then(|v| v.as_str()) {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => {
                    report.failures.push(WriteFailure {
                        id: String::new(),
                        reason: "document has no identifier".to_string(),
                    });
                    continue;
                }
            };
            if docs.contains_key(&id) {
                report.failures.push(WriteFailure {
                    id: id.clone(),
                    reason: "duplicate key".to_string(),
                });
                continue;
            }
            debug!("Inserted document {} into {}", id, collection);
            docs.insert(id, document);
            report.inserted += 1;
        }
        Ok(report)
    }
}
