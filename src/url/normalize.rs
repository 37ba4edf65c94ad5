use crate::url::NormalizedUrl;
use crate::UrlError;
use url::Url;

/// Resolves a raw href against a base URL and canonicalizes the result
///
/// # Normalization Steps
///
/// 1. Strip the fragment (everything after `#`) from the href
/// 2. Resolve it against `base` (relative path, protocol-relative or absolute)
/// 3. Reject anything whose scheme is not `http` or `https`
///    (`mailto:`, `javascript:`, `tel:`, `data:`, `ftp:`, ...)
/// 4. Drop user info, the default port and an empty query (`?`)
/// 5. Strip trailing slashes from the path, so the root path becomes empty
///
/// Never fails: anything that cannot be resolved is rejected with `None`.
///
/// # Examples
///
/// ```
/// use website_graph::url::normalize;
///
/// let url = normalize("https://example.com/docs/", "intro/#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs/intro");
///
/// assert!(normalize("https://example.com/", "mailto:me@example.com").is_none());
/// ```
pub fn normalize(base: &str, raw_href: &str) -> Option<NormalizedUrl> {
    let href = raw_href.trim();
    let href = href.split('#').next().unwrap_or_default();

    let base = Url::parse(base.trim()).ok()?;
    let resolved = base.join(href).ok()?;

    canonicalize(&resolved)
}

/// Validates and normalizes a crawl seed
///
/// Unlike [`normalize`], a rejected seed is reported with the reason so the
/// caller can fail fast before any fetch.
///
/// # Examples
///
/// ```
/// use website_graph::url::normalize_seed;
///
/// let seed = normalize_seed("https://Example.com/").unwrap();
/// assert_eq!(seed.as_str(), "https://example.com");
///
/// assert!(normalize_seed("ftp://example.com/").is_err());
/// ```
pub fn normalize_seed(seed: &str) -> Result<NormalizedUrl, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if !is_crawlable_scheme(url.scheme()) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    canonicalize(&url).ok_or(UrlError::MissingHost)
}

fn is_crawlable_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}

/// Builds the canonical string form of an already-resolved URL
fn canonicalize(url: &Url) -> Option<NormalizedUrl> {
    if !is_crawlable_scheme(url.scheme()) {
        return None;
    }

    // The url crate lowercases the host and keeps IPv6 brackets
    let host = url.host_str().filter(|h| !h.is_empty())?;

    let mut canonical = format!("{}://{}", url.scheme(), host);

    // port() is None for the scheme's default port
    if let Some(port) = url.port() {
        canonical.push(':');
        canonical.push_str(&port.to_string());
    }

    canonical.push_str(url.path().trim_end_matches('/'));

    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        canonical.push('?');
        canonical.push_str(query);
    }

    Some(NormalizedUrl(canonical))
}
