//! 金價快取與歷史紀錄。
//!
//! - 快取只有一格，存放最近一次實際抓到的泰國金價，逾時後讀取即為空。
//! - 歷史紀錄為新到舊排列、有上限的清單，每次實際抓取（非快取）新增一筆。
//!
//! 每個操作都是單一的臨界區段：快取由 `moka` 內部同步，歷史紀錄以 `RwLock` 保護。
//! 鎖取得失敗時以空值或不寫入降級，不會 panic。

use std::{collections::VecDeque, sync::RwLock, time::Duration};

use chrono::Utc;
use moka::sync::Cache;

use crate::{
    config::SETTINGS,
    declare::{HistoryEntry, PriceQuote},
    logging,
};

const QUOTE_KEY: &str = "gold_price";

pub struct PriceStore {
    /// 最新的泰國金價
    quote: Cache<&'static str, PriceQuote>,
    /// 新到舊
    history: RwLock<VecDeque<HistoryEntry>>,
    max_history: usize,
}

impl PriceStore {
    pub fn new(ttl: Duration, max_history: usize) -> Self {
        PriceStore {
            quote: Cache::builder().time_to_live(ttl).build(),
            history: RwLock::new(VecDeque::with_capacity(max_history)),
            max_history,
        }
    }

    pub fn from_settings() -> Self {
        Self::new(
            Duration::from_secs(SETTINGS.gold.cache_ttl_secs),
            SETTINGS.gold.max_history,
        )
    }

    /// 回傳尚未逾時的快取金價
    pub fn lookup(&self) -> Option<PriceQuote> {
        self.quote.get(&QUOTE_KEY)
    }

    /// 整筆取代目前的快取，並重新計算存活時間
    pub fn store(&self, quote: PriceQuote) {
        self.quote.insert(QUOTE_KEY, quote);
    }

    pub fn invalidate(&self) {
        self.quote.invalidate(&QUOTE_KEY);
    }

    /// 由金價產生一筆歷史紀錄放在最前面，超過上限的舊紀錄會被移除
    pub fn record_history(&self, quote: &PriceQuote) {
        let entry = HistoryEntry::from_quote(quote, Utc::now());
        match self.history.write() {
            Ok(mut history) => {
                history.push_front(entry);
                history.truncate(self.max_history);
            }
            Err(why) => {
                logging::error_file_async(format!(
                    "Failed to record the gold price history because {:?}",
                    why
                ));
            }
        }
    }

    /// 目前所有歷史紀錄，新到舊
    pub fn read_history(&self) -> Vec<HistoryEntry> {
        match self.history.read() {
            Ok(history) => history.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::declare::BuySell;

    fn quote(change: i64) -> PriceQuote {
        PriceQuote {
            source: "test".to_string(),
            source_url: "https://example.com/".to_string(),
            gold_bar: BuySell {
                buy: Some(Decimal::from(41000 + change)),
                sell: Some(Decimal::from(41100 + change)),
                buy_formatted: (41000 + change).to_string(),
                sell_formatted: (41100 + change).to_string(),
            },
            gold_ornament: BuySell {
                buy: None,
                sell: None,
                buy_formatted: "N/A".to_string(),
                sell_formatted: "N/A".to_string(),
            },
            price_change: change.to_string(),
            update_time: "18/10/2569 09:30".to_string(),
            currency: "THB".to_string(),
            unit: "baht".to_string(),
        }
    }

    #[test]
    fn test_store_and_lookup() {
        let store = PriceStore::new(Duration::from_secs(60), 100);
        assert_eq!(store.lookup(), None);

        store.store(quote(1));
        assert_eq!(store.lookup(), Some(quote(1)));

        // 整筆取代
        store.store(quote(2));
        assert_eq!(store.lookup(), Some(quote(2)));
    }

    #[test]
    fn test_invalidate() {
        let store = PriceStore::new(Duration::from_secs(60), 100);
        store.store(quote(1));
        store.invalidate();
        assert_eq!(store.lookup(), None);

        // 沒有資料時也可以呼叫
        store.invalidate();
        assert_eq!(store.lookup(), None);
    }

    #[tokio::test]
    async fn test_expired() {
        let store = PriceStore::new(Duration::from_millis(300), 100);
        store.store(quote(1));
        assert!(store.lookup().is_some());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(store.lookup(), None);

        // 重新寫入後存活時間重新計算
        store.store(quote(2));
        assert_eq!(store.lookup(), Some(quote(2)));
    }

    #[test]
    fn test_history_is_bounded_and_newest_first() {
        let store = PriceStore::new(Duration::from_secs(60), 100);
        for i in 0..101 {
            store.record_history(&quote(i));
        }

        let history = store.read_history();
        assert_eq!(history.len(), 100);
        assert_eq!(history[0].price_change, "100");
        assert_eq!(history[99].price_change, "1");
        assert!(history.iter().all(|h| h.price_change != "0"));
        assert!(history[0].timestamp >= history[99].timestamp);
    }

    #[test]
    fn test_history_snapshot() {
        let store = PriceStore::new(Duration::from_secs(60), 100);
        let q = quote(7);
        store.record_history(&q);

        let first = store.read_history();
        let second = store.read_history();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].gold_bar, q.gold_bar);
        assert_eq!(first[0].gold_ornament, q.gold_ornament);
        assert_eq!(first[0].price_change, "7");
    }

    #[test]
    fn test_cache_and_history_are_independent() {
        let store = PriceStore::new(Duration::from_secs(60), 3);
        store.record_history(&quote(1));
        assert_eq!(store.lookup(), None);

        store.store(quote(1));
        assert_eq!(store.read_history().len(), 1);
    }
}
