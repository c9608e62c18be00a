// 📦 Goods Receipt Record Model
// One row per inventory receipt against a purchase order, plus the
// read-only dataset snapshot every analysis runs against.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// One goods-receipt row as handed over by the loader.
/// Field names follow the SAP MM export columns.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GoodsReceipt {
    /// Unique receipt identifier (primary key within a dataset)
    #[serde(rename = "GR_ID")]
    pub gr_id: String,

    /// Purchase order the receipt was booked against
    #[serde(rename = "PO_ID")]
    pub po_id: String,

    /// Opaque date token, ordered lexically (ISO `YYYY-MM-DD` expected)
    #[serde(rename = "Received_Date")]
    pub received_date: String,

    #[serde(rename = "Received_Quantity")]
    pub received_quantity: f64,

    /// Nominally in [0, 5]; never clamped
    #[serde(rename = "Quality_Score")]
    pub quality_score: f64,
}

impl GoodsReceipt {
    pub fn new(
        gr_id: &str,
        po_id: &str,
        received_date: &str,
        received_quantity: f64,
        quality_score: f64,
    ) -> Self {
        GoodsReceipt {
            gr_id: gr_id.to_string(),
            po_id: po_id.to_string(),
            received_date: received_date.to_string(),
            received_quantity,
            quality_score,
        }
    }

    /// True when the received date sorts chronologically under string order
    pub fn has_iso_date(&self) -> bool {
        is_iso_date(&self.received_date)
    }
}

/// Check whether a date token is a calendar-valid `YYYY-MM-DD` string.
/// Only these tokens make lexical ordering equal to chronological ordering.
pub fn is_iso_date(date: &str) -> bool {
    date.len() == 10 && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

// ============================================================================
// DATASET
// ============================================================================

/// Immutable snapshot of one load cycle.
///
/// Cloning is cheap (shared `Arc`), and there is no way to mutate a record or
/// reorder the sequence through it. A reload builds a new `Dataset`; summaries
/// derived from the old one are simply dropped by the caller.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Arc<[GoodsReceipt]>,
}

impl Dataset {
    pub fn new(records: Vec<GoodsReceipt>) -> Self {
        Dataset {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[GoodsReceipt] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Two handles refer to the same load cycle
    pub fn same_snapshot(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl Deref for Dataset {
    type Target = [GoodsReceipt];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<GoodsReceipt>> for Dataset {
    fn from(records: Vec<GoodsReceipt>) -> Self {
        Dataset::new(records)
    }
}

impl FromIterator<GoodsReceipt> for Dataset {
    fn from_iter<I: IntoIterator<Item = GoodsReceipt>>(iter: I) -> Self {
        Dataset::new(iter.into_iter().collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date_detection() {
        assert!(is_iso_date("2024-01-02"));
        assert!(!is_iso_date("01/02/2024"));
        assert!(!is_iso_date("2024-1-2"));
        assert!(!is_iso_date("2024-02-30"));
        assert!(!is_iso_date(""));

        let receipt = GoodsReceipt::new("G1", "PO1", "2024-03-15", 1.0, 3.0);
        assert!(receipt.has_iso_date());
    }

    #[test]
    fn test_dataset_snapshot_identity() {
        let dataset = Dataset::new(vec![
            GoodsReceipt::new("G1", "PO1", "2024-01-02", 10.0, 4.5),
            GoodsReceipt::new("G2", "PO1", "2024-01-02", 5.0, 1.0),
        ]);

        let handle = dataset.clone();
        assert!(dataset.same_snapshot(&handle));
        assert_eq!(handle.len(), 2);
        assert_eq!(handle[1].gr_id, "G2");

        // A reload with identical content is still a different snapshot
        let reloaded: Dataset = dataset.records().to_vec().into();
        assert!(!dataset.same_snapshot(&reloaded));
        assert_eq!(dataset.records(), reloaded.records());
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
    }

    #[test]
    fn test_serde_uses_export_column_names() {
        let receipt = GoodsReceipt::new("G1", "PO1", "2024-01-02", 10.0, 4.5);
        let json = serde_json::to_value(&receipt).unwrap();

        assert_eq!(json["GR_ID"], "G1");
        assert_eq!(json["PO_ID"], "PO1");
        assert_eq!(json["Received_Date"], "2024-01-02");
        assert_eq!(json["Received_Quantity"], 10.0);
        assert_eq!(json["Quality_Score"], 4.5);
    }
}
