//! Link extraction from fetched pages
//!
//! Parsing is CPU-bound, so the async entry point hands the raw body to the
//! blocking pool and keeps the fetch I/O path free while pages are parsed.
//! Unresolvable or special-scheme hrefs are skipped per-link and never abort
//! the page.

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable anchor links from a page as absolute URLs
///
/// Hrefs are resolved against the page's own URL. Links with a `download`
/// attribute, special schemes (`javascript:`, `mailto:`, `tel:`, `data:`),
/// and non-HTTP(S) results are excluded.
pub fn extract_links_sync(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(resolved) = resolve_link(href, base_url) {
                    links.push(resolved);
                }
            }
        }
    }

    links
}

/// Async wrapper that runs the parse on the blocking thread pool
///
/// A failed parse task degrades to an empty link list with a warning; the
/// calling branch then simply yields nothing.
pub async fn extract_links(html: String, base_url: Url) -> Vec<Url> {
    let page = base_url.to_string();
    let handle = tokio::task::spawn_blocking(move || extract_links_sync(&html, &base_url));

    match handle.await {
        Ok(links) => links,
        Err(e) => {
            tracing::warn!("Link extraction task failed for {}: {}", page, e);
            Vec::new()
        }
    }
}
