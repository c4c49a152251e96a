use async_trait::async_trait;
use scraper::Html;

use crate::{
    crawler::{
        goldtraders::{GoldTraders, SOURCE_NAME},
        DomesticPrice,
    },
    declare::{BuySell, PriceQuote},
    error::GoldError,
    logging,
    util::{
        self, datetime,
        http::{element, user_agent},
        text,
    },
};

const CURRENCY: &str = "THB";
const UNIT: &str = "บาทละ (per baht weight = 15.244 grams)";
/// 取不到文字時顯示的內容
const NOT_AVAILABLE: &str = "N/A";
const NO_CHANGE: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    GoldBarBuy,
    GoldBarSell,
    GoldOrnamentBuy,
    GoldOrnamentSell,
    PriceChange,
    UpdateTime,
}

/// 找出欄位所在元素的方式
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    /// id 完全相同
    ExactId(&'static str),
    /// span 的 id 含有指定字串，取第一個符合的元素
    IdContains(&'static str),
}

impl Strategy {
    fn selector(&self) -> String {
        match self {
            Strategy::ExactId(id) => format!("#{}", id),
            Strategy::IdContains(token) => format!(r#"span[id*="{}"]"#, token),
        }
    }
}

/// 欄位 => 依序嘗試的選擇方式，第一個取到非空白文字者為準
const FIELD_RULES: &[(Field, &[Strategy])] = &[
    (
        Field::GoldBarBuy,
        &[
            Strategy::ExactId("DetailPlace_uc_goldprices1_lblBLBuy"),
            Strategy::IdContains("lblBLBuy"),
        ],
    ),
    (
        Field::GoldBarSell,
        &[
            Strategy::ExactId("DetailPlace_uc_goldprices1_lblBLSell"),
            Strategy::IdContains("lblBLSell"),
        ],
    ),
    (
        Field::GoldOrnamentBuy,
        &[
            Strategy::ExactId("DetailPlace_uc_goldprices1_lblOMBuy"),
            Strategy::IdContains("lblOMBuy"),
        ],
    ),
    (
        Field::GoldOrnamentSell,
        &[
            Strategy::ExactId("DetailPlace_uc_goldprices1_lblOMSell"),
            Strategy::IdContains("lblOMSell"),
        ],
    ),
    (
        Field::PriceChange,
        &[
            Strategy::ExactId("DetailPlace_uc_goldprices1_lblDiff"),
            Strategy::IdContains("lblDiff"),
        ],
    ),
    (
        Field::UpdateTime,
        &[
            Strategy::ExactId("DetailPlace_uc_goldprices1_lblAsOn"),
            Strategy::IdContains("lblAsOn"),
        ],
    ),
];

#[async_trait]
impl DomesticPrice for GoldTraders {
    async fn fetch_price(&self) -> Result<PriceQuote, GoldError> {
        let text = util::http::get(&self.url, Some(user_agent::browser_headers()), self.timeout)
            .await
            .map_err(|why| {
                logging::error_file_async(format!(
                    "Failed to fetch {} because {:?}",
                    self.url, why
                ));
                GoldError::source_unavailable(SOURCE_NAME, why)
            })?;

        parse(&text, &self.url)
    }
}

/// 將金商公會首頁的 HTML 轉成 [`PriceQuote`]
///
/// 個別欄位缺漏不視為錯誤：價格以 `None` 表示，漲跌預設 "0"，
/// 更新時間預設為目前時間。只有整份文件無法解讀時才回傳 `ParseFailure`。
pub fn parse(html: &str, source_url: &str) -> Result<PriceQuote, GoldError> {
    if html.trim().is_empty() {
        return Err(GoldError::parse_failure(SOURCE_NAME, "the document is empty"));
    }

    let document = Html::parse_document(html);
    let bar_buy = extract(&document, Field::GoldBarBuy)?;
    let bar_sell = extract(&document, Field::GoldBarSell)?;
    let ornament_buy = extract(&document, Field::GoldOrnamentBuy)?;
    let ornament_sell = extract(&document, Field::GoldOrnamentSell)?;
    let price_change = extract(&document, Field::PriceChange)?;
    let update_time = extract(&document, Field::UpdateTime)?;

    Ok(PriceQuote {
        source: SOURCE_NAME.to_string(),
        source_url: source_url.to_string(),
        gold_bar: buy_sell(bar_buy, bar_sell),
        gold_ornament: buy_sell(ornament_buy, ornament_sell),
        price_change: price_change.unwrap_or_else(|| NO_CHANGE.to_string()),
        update_time: update_time.unwrap_or_else(datetime::thai_locale_now),
        currency: CURRENCY.to_string(),
        unit: UNIT.to_string(),
    })
}

/// 依 [`FIELD_RULES`] 的順序嘗試，回傳第一個非空白的文字
fn extract(document: &Html, field: Field) -> Result<Option<String>, GoldError> {
    let strategies = FIELD_RULES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, strategies)| *strategies)
        .unwrap_or_default();

    for strategy in strategies {
        let text = element::first_text(document, &strategy.selector())
            .map_err(|why| GoldError::parse_failure(SOURCE_NAME, why))?;
        if text.is_some() {
            return Ok(text);
        }
    }

    Ok(None)
}

fn buy_sell(buy: Option<String>, sell: Option<String>) -> BuySell {
    BuySell {
        buy: buy.as_deref().and_then(text::parse_price),
        sell: sell.as_deref().and_then(text::parse_price),
        buy_formatted: buy.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        sell_formatted: sell.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}
