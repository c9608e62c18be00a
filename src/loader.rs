// 📂 CSV Loader
// Reads a goods-receipt export into an immutable Dataset.
// Malformed rows are dropped and reported, never repaired.

use crate::receipt::{Dataset, GoodsReceipt};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns a receipt export must carry. Anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "GR_ID",
    "PO_ID",
    "Received_Date",
    "Received_Quantity",
    "Quality_Score",
];

#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    /// 1-based line in the source (header is line 1)
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRow>,
    /// Rows whose date is not `YYYY-MM-DD`; trend order is lexical for them
    pub non_iso_dates: usize,
}

impl LoadReport {
    pub fn summary(&self) -> String {
        format!(
            "{} receipts loaded, {} rows skipped, {} non-ISO dates",
            self.loaded,
            self.skipped.len(),
            self.non_iso_dates
        )
    }
}

pub fn load_csv(csv_path: &Path) -> Result<(Dataset, LoadReport)> {
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;

    let loaded = load_from_reader(file)
        .with_context(|| format!("Failed to load receipts from {:?}", csv_path))?;

    log::info!("{:?}: {}", csv_path, loaded.1.summary());
    Ok(loaded)
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<(Dataset, LoadReport)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV header")?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            bail!("CSV header is missing required column {}", column);
        }
    }

    let mut receipts = Vec::new();
    let mut report = LoadReport::default();

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(e).context("Failed to read CSV row");
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                log::warn!("Skipping malformed row at line {}: {}", line, e);
                report.skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);

        match record.deserialize::<GoodsReceipt>(Some(&headers)) {
            Ok(receipt) => {
                if !receipt.has_iso_date() {
                    report.non_iso_dates += 1;
                }
                receipts.push(receipt);
            }
            Err(e) => {
                log::warn!("Skipping malformed row at line {}: {}", line, e);
                report.skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
            }
        }
    }

    report.loaded = receipts.len();

    if report.non_iso_dates > 0 {
        log::warn!(
            "{} receipts have non-ISO dates; trend ordering is lexical, not chronological",
            report.non_iso_dates
        );
    }

    Ok((Dataset::new(receipts), report))
}

// ============================================================================
// TESTS
// ============================================================================
