//! HTML link extraction.

use crate::page::PageId;
use scraper::{Html, Selector};
use url::Url;

/// Extracts every in-scope article link from `html`, resolving relative
/// `href`s against `base_url` and validating the resolved host against
/// `origin` (the configured article origin — production's
/// `en.wikipedia.org`, or a mock server's URI in tests). Non-article links
/// (namespace pages, external sites, anchors, `javascript:`/`mailto:`/etc.
/// schemes) are silently dropped rather than erroring — a page's link list
/// is simply whatever well-formed article links it happens to contain.
pub fn extract_article_links(html: &str, base_url: &Url, origin: &str) -> Vec<PageId> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("valid selector");

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| resolve_article_link(base_url, href, origin))
        .collect()
}

fn resolve_article_link(base_url: &Url, href: &str, origin: &str) -> Option<PageId> {
    let trimmed = href.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let resolved = base_url.join(trimmed).ok()?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    PageId::from_url_with_origin(&resolved, origin).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://en.wikipedia.org";

    fn base() -> Url {
        Url::parse("https://en.wikipedia.org/wiki/Rust_(programming_language)").unwrap()
    }

    #[test]
    fn extracts_relative_article_links() {
        let html = r#"<html><body>
            <a href="/wiki/Ferris_(mascot)">Ferris</a>
            <a href="/wiki/Cargo_(package_manager)">Cargo</a>
        </body></html>"#;
        let links = extract_article_links(html, &base(), ORIGIN);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].title(), "Ferris (mascot)");
    }

    #[test]
    fn drops_namespace_and_external_links() {
        let html = r#"<html><body>
            <a href="/wiki/Talk:Rust">Talk</a>
            <a href="/wiki/Special:Random">Random</a>
            <a href="https://example.com/">External</a>
            <a href="#cite_note-1">Footnote</a>
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:a@b.com">Mail</a>
        </body></html>"#;
        assert!(extract_article_links(html, &base(), ORIGIN).is_empty());
    }

    #[test]
    fn deduplicates_are_left_to_the_caller() {
        let html = r#"<html><body>
            <a href="/wiki/Ferris_(mascot)">Ferris</a>
            <a href="/wiki/Ferris_(mascot)">Ferris again</a>
        </body></html>"#;
        assert_eq!(extract_article_links(html, &base(), ORIGIN).len(), 2);
    }

    #[test]
    fn resolves_links_against_a_mock_origin() {
        let mock_base = Url::parse("http://127.0.0.1:9999/wiki/A").unwrap();
        let html = r#"<a href="http://127.0.0.1:9999/wiki/B">B</a>"#;
        let links = extract_article_links(html, &mock_base, "http://127.0.0.1:9999");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title(), "B");
    }

    #[test]
    fn rejects_links_outside_the_configured_origin() {
        let mock_base = Url::parse("http://127.0.0.1:9999/wiki/A").unwrap();
        let html = r#"<a href="http://127.0.0.1:1111/wiki/B">B</a>"#;
        let links = extract_article_links(html, &mock_base, "http://127.0.0.1:9999");
        assert!(links.is_empty());
    }
}
