use anyhow::{anyhow, Result};
use scraper::{Html, Selector};

/// Returns the trimmed text of the first element matching `css_selector`.
///
/// An element that exists but only holds whitespace counts as missing,
/// so callers can move on to their next selector.
///
/// # Errors
///
/// Only when `css_selector` itself is not a valid selector.
///
/// # Example
///
/// ```
/// let document = Html::parse_document(r#"<span id="price"> 41,350 </span>"#);
/// assert_eq!(first_text(&document, "#price")?, Some("41,350".to_string()));
/// ```
pub fn first_text(document: &Html, css_selector: &str) -> Result<Option<String>> {
    let selector = Selector::parse(css_selector)
        .map_err(|why| anyhow!("Failed to Selector::parse({}) because: {:?}", css_selector, why))?;

    Ok(document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty()))
}
