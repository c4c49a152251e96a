use std::time::Duration;

use crate::config::SETTINGS;

pub mod price;

pub const SOURCE_NAME: &str = "Gold Traders Association (สมาคมค้าทองคำ)";

/// 泰國金商公會首頁的金價爬蟲
#[derive(Debug, Clone)]
pub struct GoldTraders {
    url: String,
    timeout: Duration,
}

impl GoldTraders {
    pub fn new<S: Into<String>>(url: S, timeout: Duration) -> Self {
        GoldTraders {
            url: url.into(),
            timeout,
        }
    }

    pub fn from_settings() -> Self {
        Self::new(
            SETTINGS.gold.domestic_url.clone(),
            Duration::from_secs(SETTINGS.gold.timeout_secs),
        )
    }
}
