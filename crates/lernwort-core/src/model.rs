//! Core data model types for lernwort.
//!
//! These are the fundamental types that the entire lernwort system uses
//! to represent training sets and word prompts.

use serde::{Deserialize, Serialize};

/// A training set as listed by the word repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSetInfo {
    /// Unique identifier for this training set.
    pub id: u64,
    /// Human-readable title.
    pub title: String,
    /// Description of this training set.
    #[serde(default)]
    pub description: String,
}

/// A single word prompt: the canonical answer plus optional media references.
///
/// Alternate spellings are not stored here; they are fetched lazily per
/// document through the repository and cached by the trainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier for this document.
    pub id: u64,
    /// The canonical correct answer.
    pub word: String,
    /// Reference to an image shown as the question, if any.
    #[serde(default)]
    pub image: Option<String>,
    /// Reference to an audio recording of the word, if any.
    #[serde(default)]
    pub audio: Option<String>,
}
