use std::time::Duration;

use async_trait::async_trait;
use concat_string::concat_string;
use rust_decimal::{prelude::FromPrimitive, Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::{
    config::SETTINGS,
    crawler::InternationalPrice,
    declare::{InternationalQuote, PricePerOunce},
    logging, util,
};

pub const HOST: &str = "api.metalpriceapi.com";
pub const SOURCE_NAME: &str = "International Market";

#[derive(Deserialize, Debug, Default)]
struct ApiResponse {
    #[serde(default)]
    rates: Option<Rates>,
}

/// 以 XAU 為基準的匯率
#[derive(Deserialize, Debug, Default)]
struct Rates {
    #[serde(rename = "USD", default)]
    usd: Option<f64>,
    #[serde(rename = "THB", default)]
    thb: Option<f64>,
}

/// metalpriceapi.com 的國際金價
///
/// 目前使用 demo 金鑰，服務常常無法使用，這是預期中的狀態。
#[derive(Debug, Clone)]
pub struct MetalPrice {
    url: String,
    api_key: String,
    timeout: Duration,
}

impl MetalPrice {
    pub fn new<U: Into<String>, K: Into<String>>(url: U, api_key: K, timeout: Duration) -> Self {
        MetalPrice {
            url: url.into(),
            api_key: api_key.into(),
            timeout,
        }
    }

    pub fn from_settings() -> Self {
        Self::new(
            SETTINGS.gold.international_url.clone(),
            SETTINGS.gold.international_api_key.clone(),
            Duration::from_secs(SETTINGS.gold.timeout_secs),
        )
    }

    fn request_url(&self) -> String {
        concat_string!(
            self.url,
            "?api_key=",
            urlencoding::encode(&self.api_key),
            "&base=XAU&currencies=USD,THB"
        )
    }
}

#[async_trait]
impl InternationalPrice for MetalPrice {
    async fn fetch_price(&self) -> Option<InternationalQuote> {
        let url = self.request_url();
        match util::http::get_json::<ApiResponse>(&url, self.timeout).await {
            Ok(res) => {
                let quote = res.rates.and_then(to_quote);
                if quote.is_none() {
                    logging::warn_file_async(format!("{} responded without usable rates", HOST));
                }
                quote
            }
            Err(why) => {
                logging::warn_file_async(format!(
                    "International price API not available because {:?}",
                    why
                ));
                None
            }
        }
    }
}

/// 將每單位 XAU 的匯率換算成每盎司價格
///
/// USD = 1 / USD 匯率，THB = THB 匯率 / USD 匯率，四捨五入到小數兩位。
/// 沒有可用的 USD 匯率時無法換算，回傳 `None`。
fn to_quote(rates: Rates) -> Option<InternationalQuote> {
    let usd_rate = rates
        .usd
        .and_then(Decimal::from_f64)
        .filter(|rate| !rate.is_zero())?;

    let usd = Decimal::ONE.checked_div(usd_rate).map(to_fixed_2);
    let thb = rates
        .thb
        .and_then(Decimal::from_f64)
        .and_then(|thb_rate| thb_rate.checked_div(usd_rate))
        .map(to_fixed_2);

    Some(InternationalQuote {
        source: SOURCE_NAME.to_string(),
        price_per_ounce: PricePerOunce { usd, thb },
    })
}

fn to_fixed_2(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
