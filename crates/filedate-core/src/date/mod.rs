pub mod normalize;
pub mod patterns;
pub mod validate;

use chrono::{DateTime, Local};

pub use normalize::normalize;
pub use validate::{resolve_local, ValidityWindow, MIN_VALID_TIMESTAMP};

/// Outcome of running the pattern library over one filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    NotFound,
    Found {
        /// Capture instant in the local time zone, millisecond precision
        /// when the filename carries it.
        timestamp: DateTime<Local>,
        /// Recognizer label and the raw captured fields, for audit output.
        explanation: String,
        pattern_label: &'static str,
    },
}

impl ExtractionResult {
    pub fn timestamp(&self) -> Option<DateTime<Local>> {
        match self {
            Self::Found { timestamp, .. } => Some(*timestamp),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Extract a capture date from a filename, judged against the current time.
///
/// Batch callers should capture one [`ValidityWindow`] and use
/// [`extract_at`] so every file shares the same upper bound.
pub fn extract(filename: &str) -> ExtractionResult {
    extract_at(filename, &ValidityWindow::now())
}

/// Try every recognizer in priority order and return the first timestamp
/// that both parses and falls inside `window`.
pub fn extract_at(filename: &str, window: &ValidityWindow) -> ExtractionResult {
    let normalized = normalize(filename);

    for pat in patterns::PATTERNS {
        let Some(caps) = pat.captures(&normalized) else {
            continue;
        };
        let Some(timestamp) = pat.parse(&caps) else {
            tracing::trace!(pattern = pat.label, filename, "captured fields are not a calendar date");
            continue;
        };
        if !window.contains(timestamp) {
            tracing::trace!(pattern = pat.label, filename, %timestamp, "outside validity window");
            continue;
        }
        return ExtractionResult::Found {
            timestamp,
            explanation: pat.explain(&caps),
            pattern_label: pat.label,
        };
    }

    ExtractionResult::NotFound
}
