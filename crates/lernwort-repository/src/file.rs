//! File-backed repository over local TOML training sets.
//!
//! Loads every training set under a directory once at construction and
//! serves the repository queries from memory, so sessions can run entirely
//! offline.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use lernwort_core::error::RepositoryError;
use lernwort_core::model::{Document, TrainingSetInfo};
use lernwort_core::parser::{load_set_directory, TrainingSetFile};
use lernwort_core::traits::WordRepository;

/// In-memory repository built from training set TOML files.
pub struct FileRepository {
    sets: Vec<TrainingSetInfo>,
    documents: HashMap<u64, Vec<Document>>,
    alternates: HashMap<u64, Vec<String>>,
}

impl FileRepository {
    /// Load every `.toml` training set under `dir` (recursively).
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let sets = load_set_directory(dir)?;
        tracing::info!(count = sets.len(), "loaded training sets from {}", dir.display());
        Ok(Self::from_sets(sets))
    }

    /// Build a repository from already-parsed training sets.
    pub fn from_sets(sets: Vec<TrainingSetFile>) -> Self {
        let mut infos = Vec::new();
        let mut documents: HashMap<u64, Vec<Document>> = HashMap::new();
        let mut alternates = HashMap::new();

        for set in sets {
            let set_documents = documents.entry(set.info.id).or_default();
            for entry in set.entries {
                alternates.insert(entry.document.id, entry.alternates);
                set_documents.push(entry.document);
            }
            infos.push(set.info);
        }

        Self {
            sets: infos,
            documents,
            alternates,
        }
    }
}

#[async_trait]
impl WordRepository for FileRepository {
    fn name(&self) -> &str {
        "file"
    }

    async fn list_training_sets(&self) -> Result<Vec<TrainingSetInfo>, RepositoryError> {
        Ok(self.sets.clone())
    }

    async fn list_documents(&self, set_id: u64) -> Result<Vec<Document>, RepositoryError> {
        self.documents
            .get(&set_id)
            .cloned()
            .ok_or(RepositoryError::SetNotFound(set_id))
    }

    async fn list_alternates(&self, document_id: u64) -> Result<Vec<String>, RepositoryError> {
        self.alternates
            .get(&document_id)
            .cloned()
            .ok_or(RepositoryError::DocumentNotFound(document_id))
    }
}
