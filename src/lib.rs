// Receipt Insights - Core Library
// Goods-receipt analytics: quality distribution, purchase-order rollup,
// receipt trend and on-demand detail queries over an immutable dataset.

pub mod receipt;
pub mod classifier;
pub mod aggregator;
pub mod query;
pub mod summary;
pub mod loader;
pub mod config;

// Re-export commonly used types
pub use receipt::{GoodsReceipt, Dataset, is_iso_date};
pub use classifier::{classify, QualityLabel};
pub use aggregator::{
    QualityBucket, PurchaseOrderSummary, TrendPoint,
    group_by_quality, rollup_by_po, top_purchase_orders, trend_by_date,
    round_to_places, TOP_PURCHASE_ORDERS,
};
pub use query::{records_for_po, quality_issues, DEFAULT_QUALITY_ISSUE_THRESHOLD};
pub use summary::{DashboardSummary, AnalysisSession};
pub use loader::{load_csv, load_from_reader, LoadReport, SkippedRow};
pub use config::AnalysisConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
