use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 泰國金價的計價單位說明
pub const BAHT_WEIGHT_NOTE: &str =
    "Thai gold prices are in THB per baht weight (1 baht weight = 15.244 grams)";
/// 國際金價的計價單位說明
pub const TROY_OUNCE_NOTE: &str = "International prices are per troy ounce (31.1035 grams)";

/// 單一品項的買進/賣出價
///
/// 解析不到數值時 `buy`/`sell` 為 `None`，原始文字仍保留在 `*_formatted`。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuySell {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub buy: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub sell: Option<Decimal>,
    pub buy_formatted: String,
    pub sell_formatted: String,
}

/// 某一時間點從泰國金商公會取得的金價
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub source: String,
    pub source_url: String,
    /// 金條
    pub gold_bar: BuySell,
    /// 金飾
    pub gold_ornament: BuySell,
    pub price_change: String,
    pub update_time: String,
    pub currency: String,
    pub unit: String,
}

/// 回傳給呼叫端的金價，標示是否來自快取
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    #[serde(flatten)]
    pub quote: PriceQuote,
    pub cached: bool,
}

impl PriceSnapshot {
    pub fn new(quote: PriceQuote, cached: bool) -> Self {
        PriceSnapshot { quote, cached }
    }
}

/// 每盎司國際金價，已格式化為小數兩位的字串
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PricePerOunce {
    #[serde(rename = "USD")]
    pub usd: Option<String>,
    #[serde(rename = "THB")]
    pub thb: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InternationalQuote {
    pub source: String,
    pub price_per_ounce: PricePerOunce,
}

/// 歷史紀錄，只在實際抓取（非快取）時產生
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub gold_bar: BuySell,
    pub gold_ornament: BuySell,
    pub price_change: String,
}

impl HistoryEntry {
    pub fn from_quote(quote: &PriceQuote, timestamp: DateTime<Utc>) -> Self {
        HistoryEntry {
            timestamp,
            gold_bar: quote.gold_bar.clone(),
            gold_ornament: quote.gold_ornament.clone(),
            price_change: quote.price_change.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonNotes {
    pub note: String,
    pub international_note: String,
}

impl Default for ComparisonNotes {
    fn default() -> Self {
        ComparisonNotes {
            note: BAHT_WEIGHT_NOTE.to_string(),
            international_note: TROY_OUNCE_NOTE.to_string(),
        }
    }
}

/// 多來源比價結果，任一來源失敗時該欄位為 `None`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Comparison {
    pub domestic: Option<PriceQuote>,
    pub international: Option<InternationalQuote>,
    pub notes: ComparisonNotes,
}
