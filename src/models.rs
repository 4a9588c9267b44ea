// Core data models for redirhound

use serde::Serialize;
use std::fmt;

/// Result of diffing an original response batch against a
/// placeholder-substituted variant batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferenceReport {
    pub has_diff: bool,
    pub marker_word: Option<String>,
}

impl DifferenceReport {
    pub fn no_difference() -> Self {
        Self {
            has_diff: false,
            marker_word: None,
        }
    }
}

/// How processing of a single input URL ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ScanOutcome {
    /// Variant responses differed from the originals; URL was flagged.
    Flagged,
    /// Variant responses matched the originals.
    NoDifference,
    /// URL carried no parsable redirect_uri parameter.
    ExtractionFailed,
    /// The original or variant request batch failed.
    RequestFailed,
}

impl fmt::Display for ScanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanOutcome::Flagged => write!(f, "FLAGGED"),
            ScanOutcome::NoDifference => write!(f, "NO-DIFF"),
            ScanOutcome::ExtractionFailed => write!(f, "NO-REDIRECT-URI"),
            ScanOutcome::RequestFailed => write!(f, "REQUEST-FAILED"),
        }
    }
}

/// One row of the per-run scan summary.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRecord {
    pub url: String,
    pub outcome: ScanOutcome,
    pub marker_word: Option<String>,
}

impl ScanRecord {
    pub fn new(url: &str, outcome: ScanOutcome, marker_word: Option<String>) -> Self {
        Self {
            url: url.to_string(),
            outcome,
            marker_word,
        }
    }
}
