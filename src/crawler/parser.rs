//! HTML link extraction
//!
//! Extracts raw anchor hrefs. Resolution and filtering happen in the URL
//! normalizer, so the extractor stays a thin wrapper over the HTML parser.

use crate::ParseError;
use scraper::{Html, Selector};

/// Link-extraction capability consumed by the crawl loop
pub trait LinkExtractor: Send + Sync {
    /// Returns the raw href of every followable link in `content`
    ///
    /// `page_url` is used for error reporting only.
    fn extract_links(&self, content: &str, page_url: &str) -> Result<Vec<String>, ParseError>;
}

/// Link extractor for HTML documents
///
/// # Extraction Rules
///
/// **Include:** `<a href="...">` anywhere in the document, `rel="nofollow"` included
///
/// **Exclude:** `<a href="..." download>`, empty hrefs
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, content: &str, page_url: &str) -> Result<Vec<String>, ParseError> {
        let selector = Selector::parse("a[href]").map_err(|e| ParseError {
            url: page_url.to_string(),
            message: e.to_string(),
        })?;

        let document = Html::parse_document(content);

        let links = document
            .select(&selector)
            .filter(|element| element.value().attr("download").is_none())
            .filter_map(|element| element.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(str::to_string)
            .collect();

        Ok(links)
    }
}

/// Convenience function for extracting raw hrefs, empty on failure
///
/// # Example
///
/// ```
/// use website_graph::crawler::extract_links_simple;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// assert_eq!(extract_links_simple(html), vec!["/page".to_string()]);
/// ```
pub fn extract_links_simple(html: &str) -> Vec<String> {
    HtmlLinkExtractor
        .extract_links(html, "")
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(html: &str) -> Vec<String> {
        HtmlLinkExtractor
            .extract_links(html, "https://example.com/page")
            .unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        assert_eq!(links(html), vec!["https://other.com/page"]);
    }

    #[test]
    fn test_relative_links_stay_raw() {
        let html = r#"<html><body><a href="/other">A</a><a href="sub/page">B</a></body></html>"#;
        assert_eq!(links(html), vec!["/other", "sub/page"]);
    }

    #[test]
    fn test_special_schemes_are_passed_through() {
        // Rejection is the normalizer's job
        let html = r#"<a href="mailto:test@example.com">Email</a><a href="javascript:void(0)">JS</a>"#;
        assert_eq!(links(html).len(), 2);
    }

    #[test]
    fn test_skip_download_link() {
        let html = r#"<html><body><a href="/file.pdf" download>Download</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_empty_href() {
        let html = r#"<html><body><a href="   ">Blank</a><a>No href</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_follow_nofollow_links() {
        let html = r#"<html><body><a href="/page" rel="nofollow">Link</a></body></html>"#;
        assert_eq!(links(html), vec!["/page"]);
    }

    #[test]
    fn test_ignores_non_anchor_references() {
        let html = r#"
            <html>
            <head>
                <link rel="stylesheet" href="/style.css">
                <script src="/app.js"></script>
            </head>
            <body><img src="/logo.png"></body>
            </html>
        "#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_document_order_and_duplicates_kept() {
        let html = r#"
            <html>
            <body>
                <a href="/page1">Link 1</a>
                <a href="/page2">Link 2</a>
                <a href="/page1">Link 1 again</a>
            </body>
            </html>
        "#;
        assert_eq!(links(html), vec!["/page1", "/page2", "/page1"]);
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let html = r#"<html><body><a href="/ok">unclosed <div><a href="/also-ok">"#;
        assert_eq!(links(html), vec!["/ok", "/also-ok"]);
    }

    #[test]
    fn test_extract_links_simple() {
        assert!(extract_links_simple("not html at all").is_empty());
    }
}
