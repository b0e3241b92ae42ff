//! Mock repository for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use lernwort_core::error::RepositoryError;
use lernwort_core::model::{Document, TrainingSetInfo};
use lernwort_core::traits::WordRepository;

/// An in-memory word repository for testing the trainer without a server.
///
/// Returns configurable sets, documents, and alternates, and counts calls.
#[derive(Default)]
pub struct MockRepository {
    sets: Vec<TrainingSetInfo>,
    documents: HashMap<u64, Vec<Document>>,
    alternates: HashMap<u64, Vec<String>>,
    call_count: AtomicU32,
}

impl MockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a training set and its documents.
    pub fn with_set(mut self, info: TrainingSetInfo, documents: Vec<Document>) -> Self {
        self.documents.insert(info.id, documents);
        self.sets.push(info);
        self
    }

    /// Register alternate spellings for a document.
    pub fn with_alternates(mut self, document_id: u64, alternates: &[&str]) -> Self {
        self.alternates.insert(
            document_id,
            alternates.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Total number of repository calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl WordRepository for MockRepository {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_training_sets(&self) -> Result<Vec<TrainingSetInfo>, RepositoryError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.sets.clone())
    }

    async fn list_documents(&self, set_id: u64) -> Result<Vec<Document>, RepositoryError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.documents
            .get(&set_id)
            .cloned()
            .ok_or(RepositoryError::SetNotFound(set_id))
    }

    async fn list_alternates(&self, document_id: u64) -> Result<Vec<String>, RepositoryError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        // Unregistered documents simply have no alternates.
        Ok(self.alternates.get(&document_id).cloned().unwrap_or_default())
    }
}
