use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use once_cell::sync::{Lazy, OnceCell};
use reqwest::{header, Client, Method, Response};
use serde::de::DeserializeOwned;

use crate::logging::Logger;

pub mod element;
pub mod user_agent;

/// A singleton instance of the reqwest client.
static CLIENT: OnceCell<Client> = OnceCell::new();

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("http"));

/// Returns the reqwest client singleton instance or creates one if it doesn't exist.
///
/// Timeouts are set per request, so the client only carries the
/// connection-level settings shared by every source.
fn get_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        // 已安裝過 provider 時會回傳 Err，可忽略
        let _ = rustls::crypto::ring::default_provider().install_default();

        Client::builder()
            // ===== 壓縮 =====
            .brotli(true)
            .gzip(true)
            .zstd(true)
            // ===== 超時設置 =====
            .connect_timeout(Duration::from_secs(8))
            // ===== TCP 優化 =====
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            // ===== 連接池 =====
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            // ===== Cookie 和重定向 =====
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .referer(true)
            .user_agent(user_agent::DESKTOP_CHROME)
            .build()
            .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))
    })
}

/// Performs an HTTP GET request and deserializes the JSON response into the specified type.
///
/// # Arguments
///
/// * `url`: The URL to send the GET request to.
/// * `timeout`: Upper bound for the whole request, body included.
///
/// # Returns
///
/// * `Result<RES>`: The deserialized response, or an error if the request fails,
///   the status is not 2xx, or the response cannot be deserialized.
pub async fn get_json<RES: DeserializeOwned>(url: &str, timeout: Duration) -> Result<RES> {
    get_response(url, None, timeout)
        .await?
        .json::<RES>()
        .await
        .map_err(|e| anyhow!("Error parsing response JSON: {:?}", e))
}

/// Performs an HTTP GET request and returns the response as text.
///
/// # Arguments
///
/// * `url`: The URL to send the GET request to.
/// * `headers`: Extra headers, e.g. [`user_agent::browser_headers`].
/// * `timeout`: Upper bound for the whole request, body included.
pub async fn get(url: &str, headers: Option<header::HeaderMap>, timeout: Duration) -> Result<String> {
    get_response(url, headers, timeout)
        .await?
        .text()
        .await
        .map_err(|e| anyhow!("Error parsing response text: {:?}", e))
}

pub async fn get_response(
    url: &str,
    headers: Option<header::HeaderMap>,
    timeout: Duration,
) -> Result<Response> {
    send(Method::GET, url, headers, timeout).await
}

/// Sends a single request; there is no retry, a failed attempt is final.
///
/// Non-2xx responses are turned into errors so callers never parse an
/// error page as if it were data.
async fn send(
    method: Method,
    url: &str,
    headers: Option<header::HeaderMap>,
    timeout: Duration,
) -> Result<Response> {
    let visit_log = format!("{method}:{url}");
    let client = get_client()?;
    let mut rb = client.request(method, url).timeout(timeout);

    if let Some(h) = headers {
        rb = rb.headers(h);
    }

    let start = Instant::now();
    let res = rb.send().await;
    let elapsed = start.elapsed().as_millis();

    match res {
        Ok(response) => {
            let status = response.status();
            LOGGER.info(format!("{} {} {} ms", visit_log, status, elapsed));
            response
                .error_for_status()
                .map_err(|why| anyhow!("{} responded with {}: {}", url, status, why))
        }
        Err(why) => {
            LOGGER.error(format!("{} failed because {:?}. {} ms", visit_log, why, elapsed));
            if why.is_timeout() {
                return Err(anyhow!("Request to {} timed out after {:?}", url, timeout));
            }

            Err(anyhow!("Failed to send request to {}: {}", url, why))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_refused() {
        // 沒有服務在 port 9 監聽，連線會立即被拒
        let result = get("http://127.0.0.1:9/", None, Duration::from_secs(2)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    #[ignore]
    async fn test_get() {
        match get(
            "https://www.goldtraders.or.th/",
            Some(user_agent::browser_headers()),
            Duration::from_secs(10),
        )
        .await
        {
            Ok(text) => {
                assert!(!text.is_empty());
            }
            Err(why) => {
                crate::logging::error_file_async(format!("Failed to get because {:?}", why));
            }
        }
    }
}
