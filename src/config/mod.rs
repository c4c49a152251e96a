use std::{env, path::PathBuf, str::FromStr};

use anyhow::Result;
use config::{Config as config_config, File as config_file};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::logging;

const CONFIG_PATH: &str = "app.json";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct App {
    #[serde(default)]
    pub system: System,
    #[serde(default)]
    pub gold: Gold,
}

const SYSTEM_HTTP_PORT: &str = "SYSTEM_HTTP_PORT";
const PORT: &str = "PORT";
const DEFAULT_HTTP_PORT: u16 = 3000;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct System {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

impl Default for System {
    fn default() -> Self {
        System {
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

const GOLD_DOMESTIC_URL: &str = "GOLD_DOMESTIC_URL";
const GOLD_INTERNATIONAL_URL: &str = "GOLD_INTERNATIONAL_URL";
const GOLD_INTERNATIONAL_API_KEY: &str = "GOLD_INTERNATIONAL_API_KEY";
const GOLD_TIMEOUT_SECS: &str = "GOLD_TIMEOUT_SECS";
const GOLD_CACHE_TTL_SECS: &str = "GOLD_CACHE_TTL_SECS";
const GOLD_MAX_HISTORY: &str = "GOLD_MAX_HISTORY";

const DEFAULT_DOMESTIC_URL: &str = "https://www.goldtraders.or.th/";
const DEFAULT_INTERNATIONAL_URL: &str = "https://api.metalpriceapi.com/v1/latest";
const DEFAULT_INTERNATIONAL_API_KEY: &str = "demo";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 60;
const DEFAULT_MAX_HISTORY: usize = 100;

/// 金價來源、快取與歷史紀錄的設定
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Gold {
    /// 泰國金商公會 (สมาคมค้าทองคำ) 首頁
    pub domestic_url: String,
    /// 國際金價 API
    pub international_url: String,
    pub international_api_key: String,
    /// 每次請求的逾時秒數
    pub timeout_secs: u64,
    /// 快取存活秒數
    pub cache_ttl_secs: u64,
    /// 歷史紀錄最多保留筆數
    pub max_history: usize,
}

impl Default for Gold {
    fn default() -> Self {
        Gold {
            domestic_url: DEFAULT_DOMESTIC_URL.to_string(),
            international_url: DEFAULT_INTERNATIONAL_URL.to_string(),
            international_api_key: DEFAULT_INTERNATIONAL_API_KEY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

pub static SETTINGS: Lazy<App> = Lazy::new(|| {
    App::get().unwrap_or_else(|why| {
        logging::error_file_async(format!(
            "I can't read the config context because {:?}",
            why
        ));
        App::default().override_with_env()
    })
});

impl App {
    fn get() -> Result<Self> {
        let config_path = config_path();
        if config_path.exists() {
            let config: App = config_config::builder()
                .add_source(config_file::from(config_path))
                .build()?
                .try_deserialize()?;
            return Ok(config.override_with_env());
        }

        Ok(App::default().override_with_env())
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(mut self) -> Self {
        if let Ok(port) = env::var(SYSTEM_HTTP_PORT).or_else(|_| env::var(PORT)) {
            self.system.http_port = u16::from_str(&port).unwrap_or(DEFAULT_HTTP_PORT);
        }

        if let Ok(url) = env::var(GOLD_DOMESTIC_URL) {
            self.gold.domestic_url = url;
        }

        if let Ok(url) = env::var(GOLD_INTERNATIONAL_URL) {
            self.gold.international_url = url;
        }

        if let Ok(key) = env::var(GOLD_INTERNATIONAL_API_KEY) {
            self.gold.international_api_key = key;
        }

        if let Ok(secs) = env::var(GOLD_TIMEOUT_SECS) {
            self.gold.timeout_secs = u64::from_str(&secs).unwrap_or(DEFAULT_TIMEOUT_SECS);
        }

        if let Ok(secs) = env::var(GOLD_CACHE_TTL_SECS) {
            self.gold.cache_ttl_secs = u64::from_str(&secs).unwrap_or(DEFAULT_CACHE_TTL_SECS);
        }

        if let Ok(max) = env::var(GOLD_MAX_HISTORY) {
            self.gold.max_history = usize::from_str(&max).unwrap_or(DEFAULT_MAX_HISTORY);
        }

        self
    }
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}
