//! Session summary with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::Session;

/// Final tallies for one finished pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Identifier of the session this summary describes.
    pub session_id: Uuid,
    /// When the summary was produced.
    pub finished_at: DateTime<Utc>,
    /// Documents answered correctly on the first attempt.
    pub correct_count: usize,
    /// Documents answered almost correctly (including second tries).
    pub almost_count: usize,
    /// Documents answered wrongly or revealed.
    pub wrong_count: usize,
    /// `round(100 * (correct + almost) / presented)`. `None` when no
    /// document was ever presented; the caller must guard rather than
    /// divide by zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_correct: Option<u32>,
}

/// Derive the summary from the session buckets.
pub fn summarize(session: &Session) -> SessionSummary {
    let correct_count = session.correct().len();
    let almost_count = session.almost_correct().len();
    let wrong_count = session.wrong().len();
    let presented = correct_count + almost_count + wrong_count;

    let percent_correct = if presented == 0 {
        None
    } else {
        let quote = 100.0 * (correct_count + almost_count) as f64 / presented as f64;
        Some(quote.round() as u32)
    };

    SessionSummary {
        session_id: session.id(),
        finished_at: Utc::now(),
        correct_count,
        almost_count,
        wrong_count,
        percent_correct,
    }
}

impl SessionSummary {
    /// Save the summary as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize summary")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        Ok(())
    }

    /// Load a summary from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read summary from {}", path.display()))?;
        let summary: SessionSummary =
            serde_json::from_str(&content).context("failed to parse summary JSON")?;
        Ok(summary)
    }
}
