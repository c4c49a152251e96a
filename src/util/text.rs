use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

/// 清理後字串開頭可被視為數字的部分，例如 "1234.5-6" 取 "1234.5"
static LEADING_NUMBER: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)").ok());

/// Keeps only digits, decimal points and minus signs.
///
/// # Example
///
/// ```
/// assert_eq!(keep_numeric_chars("1,234.50 ฿"), "1234.50");
/// ```
pub fn keep_numeric_chars(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Tolerant price parsing.
///
/// Every character that is not a digit, `.` or `-` is dropped, then the
/// leading numeric part is parsed. Empty or unparseable text yields `None`
/// instead of an error, so a missing price never breaks the whole quote.
///
/// Values outside the range of [`Decimal`] (about ±7.9e28) also yield `None`.
///
/// # Example
///
/// ```
/// assert_eq!(parse_price("1,234.50 ฿"), Some(dec!(1234.5)));
/// assert_eq!(parse_price("N/A"), None);
/// ```
pub fn parse_price(s: &str) -> Option<Decimal> {
    let cleaned = keep_numeric_chars(s);
    if cleaned.is_empty() {
        return None;
    }

    let re = LEADING_NUMBER.as_ref()?;
    let matched = re.find(&cleaned)?.as_str();
    let (negative, digits) = match matched.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, matched),
    };

    // Decimal::from_str 不接受 "1." 或 ".5" 這類寫法
    let digits = digits.trim_end_matches('.');
    let digits = if digits.starts_with('.') {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };

    let value = Decimal::from_str(&digits).ok()?;
    Some(if negative { -value } else { value })
}
