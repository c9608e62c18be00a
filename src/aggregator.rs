// 📊 Aggregation Engine
// Three independent views over one dataset: quality distribution,
// purchase-order rollup and receipt trend. All pure, all total.

use crate::classifier::{classify, QualityLabel};
use crate::receipt::GoodsReceipt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Canonical length of the "top purchase orders" list
pub const TOP_PURCHASE_ORDERS: usize = 10;

// ============================================================================
// DERIVED VALUE TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityBucket {
    pub name: QualityLabel,
    pub count: usize,
    pub members: Vec<GoodsReceipt>,
}

impl QualityBucket {
    /// Fraction of `total` records that fall in this bucket
    pub fn share(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.count as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderSummary {
    pub po_id: String,
    pub total_quantity: f64,
    /// Mean quality score rounded to 2 decimals
    pub avg_quality: f64,
    pub receipt_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub total_quantity: f64,
    pub receipt_count: usize,
}

// ============================================================================
// GROUPING
// ============================================================================

/// Group records by `key`, keeping groups in order of first occurrence and
/// members in dataset order.
fn group_by<'a, K, F>(records: &'a [GoodsReceipt], key: F) -> Vec<(K, Vec<&'a GoodsReceipt>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&GoodsReceipt) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&GoodsReceipt>)> = Vec::new();

    for record in records {
        let k = key(record);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![record]));
            }
        }
    }

    groups
}

fn total_quantity(members: &[&GoodsReceipt]) -> f64 {
    members.iter().map(|r| r.received_quantity).sum()
}

/// Round to `places` decimals on the exact decimal value of the double.
///
/// A double stored just below a tie (2.675 is 2.67499..) rounds down.
/// Exact binary ties (0.125) round half away from zero.
pub fn round_to_places(value: f64, places: i32) -> f64 {
    let places = places.max(0);

    // Exact ties at `places` decimals are odd multiples of 2^-(places + 1)
    let halves = value * 2f64.powi(places + 1);
    if halves.fract() == 0.0 && (halves / 2.0).fract() != 0.0 {
        let factor = 10f64.powi(places);
        return (value * factor).round() / factor;
    }

    // Float formatting rounds the exact expansion; only exact ties go to even
    format!("{:.*}", places as usize, value)
        .parse()
        .unwrap_or(value)
}

// ============================================================================
// QUALITY DISTRIBUTION
// ============================================================================

/// Bucket every record by its quality label.
/// Only labels with members are emitted, in order of first occurrence.
pub fn group_by_quality(records: &[GoodsReceipt]) -> Vec<QualityBucket> {
    group_by(records, |r| classify(r.quality_score))
        .into_iter()
        .map(|(name, members)| QualityBucket {
            name,
            count: members.len(),
            members: members.into_iter().cloned().collect(),
        })
        .collect()
}

// ============================================================================
// PURCHASE-ORDER ROLLUP
// ============================================================================

/// Sum, mean and count per purchase order, sorted by total quantity
/// descending. The sort is stable: equal totals keep discovery order.
pub fn rollup_by_po(records: &[GoodsReceipt]) -> Vec<PurchaseOrderSummary> {
    let mut summaries: Vec<PurchaseOrderSummary> = group_by(records, |r| r.po_id.clone())
        .into_iter()
        .map(|(po_id, members)| {
            let receipt_count = members.len();
            let quality_sum: f64 = members.iter().map(|r| r.quality_score).sum();

            PurchaseOrderSummary {
                po_id,
                total_quantity: total_quantity(&members),
                avg_quality: round_to_places(quality_sum / receipt_count as f64, 2),
                receipt_count,
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.total_quantity
            .partial_cmp(&a.total_quantity)
            .unwrap_or(Ordering::Equal)
    });

    summaries
}

/// Rollup truncated to the first `limit` entries
pub fn top_purchase_orders(records: &[GoodsReceipt], limit: usize) -> Vec<PurchaseOrderSummary> {
    let mut summaries = rollup_by_po(records);
    summaries.truncate(limit);
    summaries
}

// ============================================================================
// RECEIPT TREND
// ============================================================================

/// Sum and count per received date, ascending by the raw date string.
/// No calendar parsing: only ISO-style dates come out chronological.
pub fn trend_by_date(records: &[GoodsReceipt]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = group_by(records, |r| r.received_date.clone())
        .into_iter()
        .map(|(date, members)| TrendPoint {
            date,
            total_quantity: total_quantity(&members),
            receipt_count: members.len(),
        })
        .collect();

    points.sort_by(|a, b| a.date.cmp(&b.date));
    points
}

// ============================================================================
// TESTS
// ============================================================================
