// 🔍 Query Layer
// On-demand detail lookups over the raw dataset. Results are fresh
// vectors; the dataset itself is never reordered.

use crate::receipt::GoodsReceipt;
use std::cmp::Ordering;

/// Business cutoff for the "quality issues" view
pub const DEFAULT_QUALITY_ISSUE_THRESHOLD: f64 = 2.0;

/// All receipts booked against `po_id`, in dataset order.
/// An unknown identifier yields an empty vector.
pub fn records_for_po(records: &[GoodsReceipt], po_id: &str) -> Vec<GoodsReceipt> {
    records
        .iter()
        .filter(|r| r.po_id == po_id)
        .cloned()
        .collect()
}

/// Receipts scoring strictly below `threshold`, worst first.
/// Equal scores keep their dataset order.
pub fn quality_issues(records: &[GoodsReceipt], threshold: f64) -> Vec<GoodsReceipt> {
    let mut issues: Vec<GoodsReceipt> = records
        .iter()
        .filter(|r| r.quality_score < threshold)
        .cloned()
        .collect();

    issues.sort_by(|a, b| {
        a.quality_score
            .partial_cmp(&b.quality_score)
            .unwrap_or(Ordering::Equal)
    });

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<GoodsReceipt> {
        vec![
            GoodsReceipt::new("G1", "PO1", "2024-01-02", 10.0, 4.5),
            GoodsReceipt::new("G2", "PO1", "2024-01-02", 5.0, 1.0),
            GoodsReceipt::new("G3", "PO2", "2024-01-01", 20.0, 3.0),
        ]
    }

    fn ids(records: &[GoodsReceipt]) -> Vec<&str> {
        records.iter().map(|r| r.gr_id.as_str()).collect()
    }

    #[test]
    fn test_records_for_po() {
        let records = sample_records();

        assert_eq!(ids(&records_for_po(&records, "PO1")), vec!["G1", "G2"]);
        assert_eq!(ids(&records_for_po(&records, "PO2")), vec!["G3"]);
        assert!(records_for_po(&records, "PO9").is_empty());
    }

    #[test]
    fn test_records_for_po_is_exact_match() {
        let records = sample_records();
        assert!(records_for_po(&records, "po1").is_empty());
        assert!(records_for_po(&records, "PO").is_empty());
    }

    #[test]
    fn test_quality_issues_default_threshold() {
        let records = sample_records();
        let issues = quality_issues(&records, DEFAULT_QUALITY_ISSUE_THRESHOLD);

        assert_eq!(ids(&issues), vec!["G2"]);
    }

    #[test]
    fn test_quality_issues_sorted_and_stable() {
        let records = vec![
            GoodsReceipt::new("A", "PO1", "2024-01-01", 1.0, 1.8),
            GoodsReceipt::new("B", "PO1", "2024-01-01", 1.0, 0.5),
            GoodsReceipt::new("C", "PO2", "2024-01-01", 1.0, 2.0),
            GoodsReceipt::new("D", "PO2", "2024-01-01", 1.0, 1.8),
            GoodsReceipt::new("E", "PO3", "2024-01-01", 1.0, -1.0),
            GoodsReceipt::new("F", "PO3", "2024-01-01", 1.0, 0.5),
        ];

        let issues = quality_issues(&records, 2.0);

        // 2.0 itself is not an issue
        assert_eq!(ids(&issues), vec!["E", "B", "F", "A", "D"]);
        assert!(issues.windows(2).all(|w| w[0].quality_score <= w[1].quality_score));
        assert!(issues.iter().all(|r| r.quality_score < 2.0));

        let excluded = records.iter().filter(|r| !issues.contains(r));
        assert!(excluded.into_iter().all(|r| r.quality_score >= 2.0));
    }

    #[test]
    fn test_quality_issues_custom_threshold() {
        let records = sample_records();

        assert_eq!(ids(&quality_issues(&records, 3.5)), vec!["G2", "G3"]);
        assert!(quality_issues(&records, 0.0).is_empty());
        assert!(quality_issues(&[], 2.0).is_empty());
    }

    #[test]
    fn test_queries_leave_dataset_untouched() {
        let records = sample_records();
        let before = records.clone();

        let _ = quality_issues(&records, 5.0);
        let _ = records_for_po(&records, "PO1");

        assert_eq!(records, before);
    }
}
