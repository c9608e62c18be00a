use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

use receipt_insights::{load_csv, AnalysisConfig, AnalysisSession};

const USAGE: &str = "\
Usage:
  receipt-insights summary [CSV]
  receipt-insights po <PO_ID> [CSV]
  receipt-insights issues [CSV] [--threshold X]";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = AnalysisConfig::load()?;

    match args.first().map(String::as_str) {
        Some("summary") => run_summary(&config, args.get(1)),
        Some("po") => {
            let po_id = args
                .get(1)
                .with_context(|| format!("Missing PO_ID\n\n{}", USAGE))?;
            run_po(&config, po_id, args.get(2))
        }
        Some("issues") => run_issues(&config, &args[1..]),
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

/// CSV path from the command line, falling back to the config file
fn resolve_data_path(config: &AnalysisConfig, arg: Option<&String>) -> Result<PathBuf> {
    match (arg, &config.data_path) {
        (Some(path), _) => Ok(PathBuf::from(path)),
        (None, Some(path)) => Ok(path.clone()),
        (None, None) => bail!("No CSV given and no data_path configured\n\n{}", USAGE),
    }
}

fn open_session(config: &AnalysisConfig, arg: Option<&String>) -> Result<AnalysisSession> {
    let csv_path = resolve_data_path(config, arg)?;
    let (dataset, report) = load_csv(&csv_path)?;

    if !report.skipped.is_empty() {
        log::warn!("{} malformed rows were skipped", report.skipped.len());
    }

    Ok(AnalysisSession::new(dataset, config.clone()))
}

fn run_summary(config: &AnalysisConfig, csv_arg: Option<&String>) -> Result<()> {
    let session = open_session(config, csv_arg)?;
    log::info!("{}", session.summary().summary());

    println!("{}", serde_json::to_string_pretty(session.summary())?);
    Ok(())
}

fn run_po(config: &AnalysisConfig, po_id: &str, csv_arg: Option<&String>) -> Result<()> {
    let session = open_session(config, csv_arg)?;
    let receipts = session.records_for_po(po_id);

    if receipts.is_empty() {
        log::info!("No receipts for purchase order {}", po_id);
    }

    println!("{}", serde_json::to_string_pretty(&receipts)?);
    Ok(())
}

fn run_issues(config: &AnalysisConfig, args: &[String]) -> Result<()> {
    let mut csv_arg = None;
    let mut threshold = config.quality_issue_threshold;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--threshold" {
            let value = iter.next().context("--threshold needs a value")?;
            threshold = value
                .parse()
                .with_context(|| format!("Invalid threshold: {}", value))?;
        } else {
            csv_arg = Some(arg);
        }
    }

    let session = open_session(config, csv_arg)?;
    let issues = session.quality_issues_below(threshold);
    log::info!("{} receipts score below {}", issues.len(), threshold);

    println!("{}", serde_json::to_string_pretty(&issues)?);
    Ok(())
}
