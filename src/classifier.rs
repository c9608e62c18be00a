// 🏷️ Quality Classifier
// Maps a quality score onto one of four fixed buckets.
// Bounds are inclusive on the upper end and checked in ascending order.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityLabel {
    #[serde(rename = "Poor (0-1.5)")]
    Poor,
    #[serde(rename = "Average (1.6-3.0)")]
    Average,
    #[serde(rename = "Good (3.1-4.0)")]
    Good,
    #[serde(rename = "Excellent (4.1-5.0)")]
    Excellent,
}

impl QualityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLabel::Poor => "Poor (0-1.5)",
            QualityLabel::Average => "Average (1.6-3.0)",
            QualityLabel::Good => "Good (3.1-4.0)",
            QualityLabel::Excellent => "Excellent (4.1-5.0)",
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a quality score. Total: negative scores land in `Poor`,
/// anything above 4.0 (including > 5) lands in `Excellent`.
pub fn classify(quality_score: f64) -> QualityLabel {
    if quality_score <= 1.5 {
        QualityLabel::Poor
    } else if quality_score <= 3.0 {
        QualityLabel::Average
    } else if quality_score <= 4.0 {
        QualityLabel::Good
    } else {
        QualityLabel::Excellent
    }
}

// ============================================================================
// TESTS
// ============================================================================
