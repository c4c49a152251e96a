use std::sync::Arc;

use crate::{
    cache::PriceStore,
    crawler::{
        goldtraders::GoldTraders, metalprice::MetalPrice, DomesticPrice, InternationalPrice,
    },
    declare::{Comparison, HistoryEntry, PriceSnapshot},
    error::GoldError,
    logging,
};

/// 金價查詢的進入點：快取、強制更新、歷史紀錄與多來源比價
pub struct GoldService {
    store: PriceStore,
    domestic: Arc<dyn DomesticPrice>,
    international: Arc<dyn InternationalPrice>,
}

impl GoldService {
    pub fn new(
        store: PriceStore,
        domestic: Arc<dyn DomesticPrice>,
        international: Arc<dyn InternationalPrice>,
    ) -> Self {
        GoldService {
            store,
            domestic,
            international,
        }
    }

    pub fn from_settings() -> Self {
        Self::new(
            PriceStore::from_settings(),
            Arc::new(GoldTraders::from_settings()),
            Arc::new(MetalPrice::from_settings()),
        )
    }

    /// 優先回傳快取；快取不存在或逾時才向金商公會抓取，
    /// 抓到後寫入快取並新增一筆歷史紀錄。
    pub async fn get_price(&self) -> Result<PriceSnapshot, GoldError> {
        if let Some(quote) = self.store.lookup() {
            return Ok(PriceSnapshot::new(quote, true));
        }

        let quote = self.domestic.fetch_price().await?;
        self.store.store(quote.clone());
        self.store.record_history(&quote);
        logging::info_file_async(format!(
            "Fetched gold price: bar {}/{} ornament {}/{} change {}",
            quote.gold_bar.buy_formatted,
            quote.gold_bar.sell_formatted,
            quote.gold_ornament.buy_formatted,
            quote.gold_ornament.sell_formatted,
            quote.price_change
        ));

        Ok(PriceSnapshot::new(quote, false))
    }

    /// 清除快取後重新抓取
    pub async fn refresh_price(&self) -> Result<PriceSnapshot, GoldError> {
        self.store.invalidate();
        self.get_price().await
    }

    pub fn get_history(&self) -> Vec<HistoryEntry> {
        self.store.read_history()
    }

    /// 同時向兩個來源取價，任一來源失敗只會讓該欄位為 `None`。
    /// 比價是當下的快照，不讀寫快取與歷史紀錄。
    pub async fn compare(&self) -> Comparison {
        let (domestic, international) = tokio::join!(
            self.domestic.fetch_price(),
            self.international.fetch_price()
        );

        let domestic = match domestic {
            Ok(quote) => Some(quote),
            Err(why) => {
                logging::warn_file_async(format!(
                    "Failed to fetch the domestic price for comparison because {}",
                    why
                ));
                None
            }
        };

        if international.is_none() {
            logging::info_file_async("International price API not available, using Thai source only");
        }

        Comparison {
            domestic,
            international,
            notes: Default::default(),
        }
    }
}
