// Receipt Insights - Web Server
// JSON API over one dataset load, with axum

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use receipt_insights::{load_csv, AnalysisConfig, AnalysisSession, GoodsReceipt};

/// Shared application state. The session is read-only once loaded,
/// so handlers share it without a lock.
#[derive(Clone)]
struct AppState {
    session: Arc<AnalysisSession>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

#[derive(Deserialize)]
struct IssuesParams {
    threshold: Option<f64>,
}

/// Purchase-order detail response
#[derive(Serialize)]
struct PurchaseOrderDetail {
    po_id: String,
    receipts: Vec<GoodsReceipt>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/summary - Quality buckets, top purchase orders, trend
async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.session.summary().clone()))
}

/// GET /api/purchase-orders/:po_id - Receipts for one purchase order
async fn get_purchase_order(
    State(state): State<AppState>,
    Path(po_id): Path<String>,
) -> impl IntoResponse {
    // Unknown identifiers are a valid empty result
    let receipts = state.session.records_for_po(&po_id);
    Json(ApiResponse::ok(PurchaseOrderDetail { po_id, receipts }))
}

/// GET /api/quality-issues?threshold=X - Low-scoring receipts, worst first
async fn get_quality_issues(
    State(state): State<AppState>,
    Query(params): Query<IssuesParams>,
) -> impl IntoResponse {
    let issues = match params.threshold {
        Some(threshold) => state.session.quality_issues_below(threshold),
        None => state.session.quality_issues(),
    };

    Json(ApiResponse::ok(issues))
}

fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/summary", get(get_summary))
        .route("/purchase-orders/:po_id", get(get_purchase_order))
        .route("/quality-issues", get(get_quality_issues))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AnalysisConfig::load()?;

    let csv_path = match std::env::args().nth(1) {
        Some(path) => std::path::PathBuf::from(path),
        None => match &config.data_path {
            Some(path) => path.clone(),
            None => anyhow::bail!("Usage: receipt-server <CSV> (or set data_path in config)"),
        },
    };

    let (dataset, report) = load_csv(&csv_path)?;
    log::info!("Dataset loaded: {}", report.summary());

    let session = AnalysisSession::new(dataset, config.clone());
    log::info!("{}", session.summary().summary());

    let state = AppState {
        session: Arc::new(session),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str()).await?;
    log::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use receipt_insights::Dataset;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let dataset = Dataset::new(vec![
            GoodsReceipt::new("G1", "PO1", "2024-01-02", 10.0, 4.5),
            GoodsReceipt::new("G2", "PO1", "2024-01-02", 5.0, 1.0),
            GoodsReceipt::new("G3", "PO2", "2024-01-01", 20.0, 3.0),
        ]);

        build_router(AppState {
            session: Arc::new(AnalysisSession::new(dataset, AnalysisConfig::default())),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_summary_endpoint() {
        let (status, json) = get_json("/api/summary").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["record_count"], 3);
        assert_eq!(json["data"]["top_purchase_orders"][0]["po_id"], "PO2");
        assert_eq!(
            json["data"]["top_purchase_orders_preview"],
            json["data"]["top_purchase_orders"]
        );
    }

    #[tokio::test]
    async fn test_purchase_order_endpoint() {
        let (status, json) = get_json("/api/purchase-orders/PO1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["receipts"].as_array().unwrap().len(), 2);

        let (status, json) = get_json("/api/purchase-orders/PO9").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["po_id"], "PO9");
        assert!(json["data"]["receipts"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quality_issues_endpoint() {
        let (_, json) = get_json("/api/quality-issues").await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["GR_ID"], "G2");

        let (_, json) = get_json("/api/quality-issues?threshold=3.5").await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }
}
