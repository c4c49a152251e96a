use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::GoldError, logging, service::GoldService};

/// 成功時的回應格式
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Success<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fetched_at: Option<DateTime<Utc>>,
}

impl<T: Serialize> Success<T> {
    fn new(data: T) -> Self {
        Success {
            success: true,
            data,
            count: None,
            message: None,
            fetched_at: None,
        }
    }

    fn fetched_now(mut self) -> Self {
        self.fetched_at = Some(Utc::now());
        self
    }

    fn respond(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// 失敗時的回應格式，不帶堆疊資訊
#[derive(Serialize, Debug)]
struct Failure {
    success: bool,
    error: &'static str,
    message: String,
}

fn failure(error: &'static str, why: GoldError) -> Response {
    logging::error_file_async(format!("{}: {}", error, why));
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Failure {
            success: false,
            error,
            message: why.to_string(),
        }),
    )
        .into_response()
}

pub fn router() -> Router<Arc<GoldService>> {
    Router::new()
        .route("/price", get(price))
        .route("/history", get(history))
        .route("/refresh", get(refresh))
        .route("/compare", get(compare))
}

/// GET /api/gold/price
async fn price(State(service): State<Arc<GoldService>>) -> Response {
    match service.get_price().await {
        Ok(snapshot) => Success::new(snapshot).fetched_now().respond(),
        Err(why) => failure("Failed to fetch gold price", why),
    }
}

/// GET /api/gold/history
async fn history(State(service): State<Arc<GoldService>>) -> Response {
    let history = service.get_history();
    let mut res = Success::new(history);
    res.count = Some(res.data.len());
    res.respond()
}

/// GET /api/gold/refresh
async fn refresh(State(service): State<Arc<GoldService>>) -> Response {
    match service.refresh_price().await {
        Ok(snapshot) => {
            let mut res = Success::new(snapshot).fetched_now();
            res.message = Some("Price refreshed successfully");
            res.respond()
        }
        Err(why) => failure("Failed to refresh gold price", why),
    }
}

/// GET /api/gold/compare
async fn compare(State(service): State<Arc<GoldService>>) -> Response {
    Success::new(service.compare().await)
        .fetched_now()
        .respond()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::{
        cache::PriceStore,
        crawler::{DomesticPrice, InternationalPrice},
        declare::{BuySell, InternationalQuote, PriceQuote},
    };

    struct StaticDomestic {
        fail: bool,
    }

    #[async_trait]
    impl DomesticPrice for StaticDomestic {
        async fn fetch_price(&self) -> Result<PriceQuote, GoldError> {
            if self.fail {
                return Err(GoldError::source_unavailable(
                    "Gold Traders Association",
                    "operation timed out",
                ));
            }

            let none = BuySell {
                buy: None,
                sell: None,
                buy_formatted: "N/A".to_string(),
                sell_formatted: "N/A".to_string(),
            };
            Ok(PriceQuote {
                source: "static".to_string(),
                source_url: "https://example.com/".to_string(),
                gold_bar: none.clone(),
                gold_ornament: none,
                price_change: "0".to_string(),
                update_time: "18/10/2569 09:29".to_string(),
                currency: "THB".to_string(),
                unit: "baht".to_string(),
            })
        }
    }

    struct Unavailable;

    #[async_trait]
    impl InternationalPrice for Unavailable {
        async fn fetch_price(&self) -> Option<InternationalQuote> {
            None
        }
    }

    fn state(fail: bool) -> State<Arc<GoldService>> {
        State(Arc::new(GoldService::new(
            PriceStore::new(Duration::from_secs(60), 100),
            Arc::new(StaticDomestic { fail }),
            Arc::new(Unavailable),
        )))
    }

    async fn body_json(res: Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_price() {
        let res = price(state(false)).await;
        assert_eq!(res.status(), StatusCode::OK);

        let json = body_json(res).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["cached"], false);
        assert_eq!(json["data"]["currency"], "THB");
        assert!(json["fetchedAt"].is_string());
        assert!(json.get("count").is_none());
    }

    #[tokio::test]
    async fn test_price_failure() {
        let res = price(state(true)).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(res).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Failed to fetch gold price");
        assert_eq!(
            json["message"],
            "Failed to fetch from Gold Traders Association: operation timed out"
        );
    }

    #[tokio::test]
    async fn test_history_and_refresh() {
        let state = state(false);

        let json = body_json(history(state.clone()).await).await;
        assert_eq!(json["count"], 0);
        assert!(json["data"].as_array().unwrap().is_empty());

        let json = body_json(refresh(state.clone()).await).await;
        assert_eq!(json["message"], "Price refreshed successfully");
        assert_eq!(json["data"]["cached"], false);

        let json = body_json(history(state).await).await;
        assert_eq!(json["count"], 1);
        assert!(json.get("fetchedAt").is_none());
    }

    #[tokio::test]
    async fn test_refresh_failure() {
        let json = body_json(refresh(state(true)).await).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Failed to refresh gold price");
    }

    #[tokio::test]
    async fn test_compare() {
        let res = compare(state(true)).await;
        assert_eq!(res.status(), StatusCode::OK);

        let json = body_json(res).await;
        assert_eq!(json["success"], true);
        assert!(json["data"]["domestic"].is_null());
        assert!(json["data"]["international"].is_null());
        assert!(json["data"]["notes"]["note"].is_string());
    }
}
