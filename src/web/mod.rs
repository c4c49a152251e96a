use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::{config::SETTINGS, logging, service::GoldService};

pub mod gold;

const NAME: &str = "Gold Price API";

pub fn router(service: Arc<GoldService>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api/gold", gold::router())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// 啟動 HTTP 服務，直到服務結束才返回
pub async fn start(service: Arc<GoldService>) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], SETTINGS.system.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    logging::info_file_async(format!("{} running at http://{:?}", NAME, addr));
    logging::info_console(format!(
        "Get gold price: http://localhost:{}/api/gold/price",
        addr.port()
    ));

    axum::serve(listener, router(service)).await?;

    Ok(())
}

async fn index() -> Json<Value> {
    Json(json!({
        "name": NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "goldPrice": "/api/gold/price",
            "goldPriceHistory": "/api/gold/history",
            "goldPriceRefresh": "/api/gold/refresh",
            "goldPriceCompare": "/api/gold/compare"
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
        "message": format!("{} is running", NAME)
    }))
}
