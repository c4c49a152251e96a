use reqwest::header::{self, HeaderMap, HeaderValue};

/// 桌面版 Chrome 的 User-Agent，部分網站會依瀏覽器指紋回傳不同內容
pub const DESKTOP_CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// 偏好泰文，其次英文
const ACCEPT_LANGUAGE_TH: &str = "th,en-US;q=0.9,en;q=0.8";

/// Headers that make a request look like it came from a desktop browser
/// browsing in Thai.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(3);
    headers.insert(header::USER_AGENT, HeaderValue::from_static(DESKTOP_CHROME));
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE_TH),
    );
    headers
}
