//! TOML training set parser.
//!
//! Loads training sets from TOML files and directories, and validates them.
//! This is the on-disk counterpart to the repository's REST API: the same
//! set, document, and alternate data, editable locally.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Document, TrainingSetInfo};

/// Intermediate TOML structure for parsing training set files.
#[derive(Debug, Deserialize)]
struct TomlSetFile {
    training_set: TomlSetHeader,
    #[serde(default)]
    documents: Vec<TomlDocument>,
}

#[derive(Debug, Deserialize)]
struct TomlSetHeader {
    id: u64,
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlDocument {
    id: u64,
    word: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    audio: Option<String>,
    #[serde(default)]
    alternates: Vec<String>,
}

/// A parsed training set file: set metadata plus the documents with their
/// alternate spellings.
#[derive(Debug, Clone)]
pub struct TrainingSetFile {
    pub info: TrainingSetInfo,
    pub entries: Vec<DocumentEntry>,
}

/// One document together with its accepted alternate spellings.
#[derive(Debug, Clone)]
pub struct DocumentEntry {
    pub document: Document,
    pub alternates: Vec<String>,
}

/// Parse a single TOML file into a `TrainingSetFile`.
pub fn parse_training_set(path: &Path) -> Result<TrainingSetFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read training set file: {}", path.display()))?;

    parse_training_set_str(&content, path)
}

/// Parse a TOML string into a `TrainingSetFile` (useful for testing).
pub fn parse_training_set_str(content: &str, source_path: &Path) -> Result<TrainingSetFile> {
    let parsed: TomlSetFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let entries = parsed
        .documents
        .into_iter()
        .map(|d| DocumentEntry {
            document: Document {
                id: d.id,
                word: d.word,
                image: d.image,
                audio: d.audio,
            },
            alternates: d.alternates,
        })
        .collect();

    Ok(TrainingSetFile {
        info: TrainingSetInfo {
            id: parsed.training_set.id,
            title: parsed.training_set.title,
            description: parsed.training_set.description,
        },
        entries,
    })
}

/// Recursively load all `.toml` training set files from a directory.
pub fn load_set_directory(dir: &Path) -> Result<Vec<TrainingSetFile>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_set_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_training_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// A warning from training set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The document id (if applicable).
    pub document_id: Option<u64>,
    /// Warning message.
    pub message: String,
}

/// Validate a training set for common issues.
pub fn validate_training_set(set: &TrainingSetFile) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.entries.is_empty() {
        warnings.push(ValidationWarning {
            document_id: None,
            message: "training set has no documents".into(),
        });
    }

    // Check for duplicate document IDs
    let mut seen_ids = std::collections::HashSet::new();
    for entry in &set.entries {
        if !seen_ids.insert(entry.document.id) {
            warnings.push(ValidationWarning {
                document_id: Some(entry.document.id),
                message: format!("duplicate document ID: {}", entry.document.id),
            });
        }
    }

    // Check for empty words
    for entry in &set.entries {
        if entry.document.word.trim().is_empty() {
            warnings.push(ValidationWarning {
                document_id: Some(entry.document.id),
                message: "word is empty".into(),
            });
        }
    }

    // Check for alternates that repeat the primary word
    for entry in &set.entries {
        for alternate in &entry.alternates {
            if alternate.trim() == entry.document.word.trim() {
                warnings.push(ValidationWarning {
                    document_id: Some(entry.document.id),
                    message: format!("alternate '{alternate}' repeats the primary word"),
                });
            }
        }
    }

    warnings
}
