// ⚙️ Analysis Configuration
// Thresholds and limits as data, loaded from JSON with every field defaulted.

use crate::aggregator::TOP_PURCHASE_ORDERS;
use crate::query::DEFAULT_QUALITY_ISSUE_THRESHOLD;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "RECEIPT_INSIGHTS_CONFIG";

const DEFAULT_PREVIEW: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Receipts scoring strictly below this are quality issues
    pub quality_issue_threshold: f64,

    /// Length of the ranked purchase-order list
    pub top_purchase_order_limit: usize,

    /// Length of the overview preview (a prefix of the ranked list)
    pub top_purchase_order_preview: usize,

    /// CSV export to load when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,

    /// Listen address for the API server
    pub bind_addr: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            quality_issue_threshold: DEFAULT_QUALITY_ISSUE_THRESHOLD,
            top_purchase_order_limit: TOP_PURCHASE_ORDERS,
            top_purchase_order_preview: DEFAULT_PREVIEW,
            data_path: None,
            bind_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load config from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: AnalysisConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        Ok(config)
    }

    /// Load from `$RECEIPT_INSIGHTS_CONFIG` if set, otherwise defaults
    pub fn load() -> Result<Self> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("Loading config from {:?}", path);
                Self::from_file(PathBuf::from(path))
            }
            None => Ok(Self::default()),
        }
    }

    /// Preview length, never longer than the ranked list
    pub fn preview_len(&self) -> usize {
        self.top_purchase_order_preview
            .min(self.top_purchase_order_limit)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_business_rules() {
        let config = AnalysisConfig::default();

        assert_eq!(config.quality_issue_threshold, 2.0);
        assert_eq!(config.top_purchase_order_limit, 10);
        assert_eq!(config.top_purchase_order_preview, 5);
        assert_eq!(config.preview_len(), 5);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "quality_issue_threshold": 2.5, "data_path": "receipts.csv" }}"#
        )
        .unwrap();

        let config = AnalysisConfig::from_file(file.path()).unwrap();

        assert_eq!(config.quality_issue_threshold, 2.5);
        assert_eq!(config.top_purchase_order_limit, 10);
        assert_eq!(config.data_path, Some(PathBuf::from("receipts.csv")));
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_preview_clamped_to_limit() {
        let config = AnalysisConfig {
            top_purchase_order_limit: 3,
            ..AnalysisConfig::default()
        };
        assert_eq!(config.preview_len(), 3);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(AnalysisConfig::from_file(file.path()).is_err());
        assert!(AnalysisConfig::from_file("/nonexistent/receipt-insights.json").is_err());
    }
}
