use thiserror::Error;

/// 取得金價時可能發生的錯誤
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoldError {
    /// 網路錯誤、逾時或非 2xx 回應
    #[error("Failed to fetch from {site}: {cause}")]
    SourceUnavailable { site: String, cause: String },

    /// 取回的文件完全無法解讀（個別欄位缺漏不算）
    #[error("Failed to parse document from {site}: {cause}")]
    ParseFailure { site: String, cause: String },
}

impl GoldError {
    pub fn source_unavailable<S: Into<String>, C: ToString>(site: S, cause: C) -> Self {
        GoldError::SourceUnavailable {
            site: site.into(),
            cause: cause.to_string(),
        }
    }

    pub fn parse_failure<S: Into<String>, C: ToString>(site: S, cause: C) -> Self {
        GoldError::ParseFailure {
            site: site.into(),
            cause: cause.to_string(),
        }
    }
}
