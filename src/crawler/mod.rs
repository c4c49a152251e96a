use async_trait::async_trait;

use crate::{
    declare::{InternationalQuote, PriceQuote},
    error::GoldError,
};

/// 泰國金商公會
pub mod goldtraders;
/// metalpriceapi.com 國際金價
pub mod metalprice;

/// 必要的金價來源，失敗時回傳錯誤
#[async_trait]
pub trait DomesticPrice: Send + Sync {
    async fn fetch_price(&self) -> Result<PriceQuote, GoldError>;
}

/// 選用的金價來源，取不到時回傳 `None` 而不是錯誤
#[async_trait]
pub trait InternationalPrice: Send + Sync {
    async fn fetch_price(&self) -> Option<InternationalQuote>;
}
