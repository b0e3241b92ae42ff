//! Answer classification against a word and its accepted alternates.
//!
//! An answer is scored against the primary word and every alternate
//! spelling; the reference with the lowest mistake rate decides the
//! verdict.

use serde::{Deserialize, Serialize};

use crate::scorer::edit_distance;

/// Tri-state verdict for a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStatus {
    /// The answer matches a reference exactly.
    Valid,
    /// The answer is within the tolerated mistake rate.
    AlmostValid,
    /// The answer is too far from every reference.
    Invalid,
}

/// The result of checking one answer. Produced fresh per check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    /// The verdict.
    pub status: AnswerStatus,
    /// The reference string (primary word or alternate) that produced the
    /// best mistake rate; used for hinting.
    pub matched_reference: String,
    /// Whether case differences alone account for part of the edit distance.
    pub case_sensitive_mistake: bool,
}

/// Tunable grading thresholds.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Highest mistake rate still graded as almost valid.
    pub almost_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            almost_threshold: 0.25,
        }
    }
}

/// Edit distance normalized by the reference length. An empty reference
/// falls back to the raw distance so the degenerate empty-word case cannot
/// divide by zero.
fn mistake_rate(reference: &str, input: &str) -> f64 {
    let distance = edit_distance(reference, input) as f64;
    let reference_len = reference.trim().chars().count();
    if reference_len == 0 {
        distance
    } else {
        distance / reference_len as f64
    }
}

/// Grade `input` against `primary_word` and its `alternates`.
///
/// The primary word is evaluated first and wins ties; among alternates,
/// earlier entries win ties against later ones (only a strictly lower rate
/// replaces the current best).
pub fn classify(
    input: &str,
    primary_word: &str,
    alternates: &[String],
    config: &ClassifierConfig,
) -> Verification {
    let mut best_reference = primary_word;
    let mut best_rate = mistake_rate(primary_word, input);

    for alternate in alternates {
        let rate = mistake_rate(alternate, input);
        if rate < best_rate {
            best_rate = rate;
            best_reference = alternate;
        }
    }

    let case_sensitive_mistake = edit_distance(best_reference, input)
        != edit_distance(&best_reference.to_lowercase(), &input.to_lowercase());

    let status = if best_rate == 0.0 {
        AnswerStatus::Valid
    } else if best_rate <= config.almost_threshold {
        AnswerStatus::AlmostValid
    } else {
        AnswerStatus::Invalid
    };

    Verification {
        status,
        matched_reference: best_reference.to_string(),
        case_sensitive_mistake,
    }
}
