use url::Url;

/// Schemes that never lead to a crawlable page
const SKIPPED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Normalizes a user-supplied seed
///
/// Surrounding whitespace is trimmed and `https://` is prefixed when the seed
/// carries no `http://` or `https://` scheme. A seed is never rejected here;
/// parsing happens when the crawl starts.
///
/// # Examples
///
/// ```
/// use smart_inspector::url::normalize_seed;
///
/// assert_eq!(normalize_seed("example.com"), "https://example.com");
/// assert_eq!(normalize_seed("  http://example.com/a "), "http://example.com/a");
/// ```
pub fn normalize_seed(seed: &str) -> String {
    let seed = seed.trim();
    let lower = seed.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        seed.to_string()
    } else {
        format!("https://{}", seed)
    }
}

/// Resolves an href against a base URL
///
/// Returns None for empty hrefs and hrefs that fail to resolve. Unlike
/// [`resolve_link`] the scheme is not filtered, so this serves surfaces such
/// as background images where the resolved text is only inspected.
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base_url.join(href).ok()
}

/// Resolves a link href to an absolute, crawlable URL
///
/// Returns None if the link should not be followed:
/// - javascript:, mailto:, tel:, data: hrefs
/// - fragment-only hrefs (same page anchors)
/// - hrefs that fail to resolve
/// - anything that is not HTTP(S) after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let trimmed = href.trim();
    let lower = trimmed.to_lowercase();

    if SKIPPED_PREFIXES.iter().any(|p| lower.starts_with(p)) || trimmed.starts_with('#') {
        return None;
    }

    let mut absolute = resolve_href(trimmed, base_url)?;
    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    // Fragments address the same document
    absolute.set_fragment(None);
    Some(absolute)
}
