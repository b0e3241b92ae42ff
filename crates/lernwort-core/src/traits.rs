//! Collaborator trait for the word repository.
//!
//! This async trait is implemented by the `lernwort-repository` crate for
//! the REST API, local training-set files, and the test mock.

use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::model::{Document, TrainingSetInfo};

/// Source of training sets, word documents, and alternate spellings.
///
/// Transport, auth, caching, and retry policy all live behind this trait;
/// the trainer only requires that a failed call left no state behind and
/// may be retried.
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Human-readable source name (e.g. "http").
    fn name(&self) -> &str;

    /// List the available training sets.
    async fn list_training_sets(&self) -> Result<Vec<TrainingSetInfo>, RepositoryError>;

    /// List the documents of one training set.
    async fn list_documents(&self, set_id: u64) -> Result<Vec<Document>, RepositoryError>;

    /// List the alternate spellings accepted for one document. Documents
    /// without alternates yield an empty list.
    async fn list_alternates(&self, document_id: u64) -> Result<Vec<String>, RepositoryError>;
}
