//! Portal-specific collectors
//!
//! Each portal module owns its URL scheme and HTML extraction; both expose
//! the same [`Producer`](crate::producer::Producer) capability to the
//! dispatcher. Neither attempts anti-bot evasion or JS rendering; listings
//! are extracted from the server-rendered search result pages.

pub mod jora;
pub mod seek;

pub use jora::JoraCrawler;
pub use seek::SeekCrawler;

use scraper::{ElementRef, Selector};

/// Browser user agent sent with every portal request.
pub(crate) const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Courtesy delay between successive page fetches of one portal.
pub(crate) const PAGE_DELAY_MS: u64 = 250;

/// Trimmed text of the first match under `element`, if any and non-empty.
pub(crate) fn select_text(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}
