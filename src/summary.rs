// 🧾 Dashboard Summary
// The default view of one dataset load: quality distribution, ranked
// purchase orders and receipt trend, computed once and then read-only.

use crate::aggregator::{
    group_by_quality, rollup_by_po, trend_by_date, PurchaseOrderSummary, QualityBucket,
    TrendPoint,
};
use crate::config::AnalysisConfig;
use crate::query::{quality_issues, records_for_po};
use crate::receipt::{Dataset, GoodsReceipt};
use serde::ser::{Serialize, SerializeStruct, Serializer};

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub record_count: usize,
    pub quality_buckets: Vec<QualityBucket>,
    /// Ranked by total quantity, truncated to the configured limit
    pub top_purchase_orders: Vec<PurchaseOrderSummary>,
    pub trend: Vec<TrendPoint>,
    preview_len: usize,
}

impl DashboardSummary {
    /// Compute with the default limits (top 10, preview 5)
    pub fn compute(records: &[GoodsReceipt]) -> Self {
        Self::compute_with(records, &AnalysisConfig::default())
    }

    pub fn compute_with(records: &[GoodsReceipt], config: &AnalysisConfig) -> Self {
        let mut top_purchase_orders = rollup_by_po(records);
        top_purchase_orders.truncate(config.top_purchase_order_limit);

        let summary = DashboardSummary {
            record_count: records.len(),
            quality_buckets: group_by_quality(records),
            top_purchase_orders,
            trend: trend_by_date(records),
            preview_len: config.preview_len(),
        };

        log::debug!(
            "Summary over {} receipts: {} quality buckets, {} purchase orders, {} trend points",
            summary.record_count,
            summary.quality_buckets.len(),
            summary.top_purchase_orders.len(),
            summary.trend.len()
        );

        summary
    }

    /// Leading slice of the ranked list used by the overview
    pub fn top_purchase_orders_preview(&self) -> &[PurchaseOrderSummary] {
        let end = self.preview_len.min(self.top_purchase_orders.len());
        &self.top_purchase_orders[..end]
    }

    pub fn summary(&self) -> String {
        format!(
            "{} receipts | {} quality buckets | top PO: {} | {} receipt dates",
            self.record_count,
            self.quality_buckets.len(),
            self.top_purchase_orders
                .first()
                .map(|po| po.po_id.as_str())
                .unwrap_or("-"),
            self.trend.len()
        )
    }
}

/// The preview goes out as its own list, sliced from the ranked one
impl Serialize for DashboardSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DashboardSummary", 5)?;
        state.serialize_field("record_count", &self.record_count)?;
        state.serialize_field("quality_buckets", &self.quality_buckets)?;
        state.serialize_field("top_purchase_orders", &self.top_purchase_orders)?;
        state.serialize_field(
            "top_purchase_orders_preview",
            self.top_purchase_orders_preview(),
        )?;
        state.serialize_field("trend", &self.trend)?;
        state.end()
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// One analysis session: a dataset snapshot plus the summary derived from it.
/// Detail queries run on demand against the same snapshot.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    dataset: Dataset,
    config: AnalysisConfig,
    summary: DashboardSummary,
}

impl AnalysisSession {
    pub fn new(dataset: Dataset, config: AnalysisConfig) -> Self {
        let summary = DashboardSummary::compute_with(&dataset, &config);
        AnalysisSession {
            dataset,
            config,
            summary,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn summary(&self) -> &DashboardSummary {
        &self.summary
    }

    pub fn records_for_po(&self, po_id: &str) -> Vec<GoodsReceipt> {
        records_for_po(&self.dataset, po_id)
    }

    /// Issues below the configured threshold
    pub fn quality_issues(&self) -> Vec<GoodsReceipt> {
        quality_issues(&self.dataset, self.config.quality_issue_threshold)
    }

    pub fn quality_issues_below(&self, threshold: f64) -> Vec<GoodsReceipt> {
        quality_issues(&self.dataset, threshold)
    }

    /// Replace the dataset wholesale; the old summary is discarded
    pub fn reload(&mut self, dataset: Dataset) {
        *self = AnalysisSession::new(dataset, self.config.clone());
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        AnalysisSession::new(Dataset::default(), AnalysisConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
