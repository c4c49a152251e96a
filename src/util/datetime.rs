use chrono::{DateTime, Datelike, Local, TimeZone};

/// 佛曆與西元的年份差
const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Renders a timestamp the way a Thai (`th-TH`) locale shows it:
/// `d/m/yyyy HH:MM:SS` with the year in the Buddhist era.
///
/// # Example
///
/// ```
/// // 2024-03-05 09:07:02 => "5/3/2567 09:07:02"
/// ```
pub fn to_thai_locale_string<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}/{}/{} {}",
        dt.day(),
        dt.month(),
        dt.year() + BUDDHIST_ERA_OFFSET,
        dt.format("%H:%M:%S")
    )
}

/// 目前的本地時間，以泰國慣用格式呈現
pub fn thai_locale_now() -> String {
    to_thai_locale_string(&Local::now())
}
