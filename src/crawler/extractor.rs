//! Content extraction from parsed pages
//!
//! Given a parsed document and the page's final (post-redirect) URL this
//! module yields:
//! - outbound links with their external-hop depth
//! - category sections of the site (first page only)
//! - keyword match records across the scanned surfaces

use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::matcher::KeywordMatcher;
use crate::state::{Category, MatchKind, MatchRecord};
use crate::url::{is_external, resolve_href, resolve_link};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Elements whose surfaces are scanned for keywords
const SCAN_SELECTOR: &str = "a, div, section, title, main, article, span, p, img";

/// The page description tag, scanned in addition to [`SCAN_SELECTOR`]
const META_DESCRIPTION_SELECTOR: &str = r#"meta[name="description"]"#;

/// Href prefixes never treated as category links
const NON_NAVIGABLE_PREFIXES: &[&str] = &["javascript:", "#", "mailto:", "tel:"];

static CATEGORY_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/category/([^/?#]+)").expect("Failed to compile category segment regex")
});

static CSS_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"url\(\s*['"]?(.*?)['"]?\s*\)"#).expect("Failed to compile CSS url regex")
});

/// Extracts followable links from the document
///
/// Each `a[href]` is resolved against `final_url`. Links leaving the main
/// site cost one external hop; same-site links keep the current depth.
/// Links deeper than the frontier's limit, and links already visited, are
/// dropped. Links already queued are not checked and may be returned again.
///
/// # Arguments
///
/// * `document` - The parsed page
/// * `final_url` - URL the page was served from
/// * `depth` - External-hop depth of the page itself
/// * `main_host` - Site key of the main domain
/// * `frontier` - Consulted for the visited set and depth limit
pub fn extract_links(
    document: &Html,
    final_url: &Url,
    depth: u8,
    main_host: &str,
    frontier: &Frontier,
) -> Vec<FrontierEntry> {
    let mut links = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(absolute) = resolve_link(href, final_url) else {
            continue;
        };

        let new_depth = if is_external(&absolute, main_host) {
            depth.saturating_add(1)
        } else {
            depth
        };

        if new_depth <= frontier.max_depth() && !frontier.is_visited(absolute.as_str()) {
            links.push(FrontierEntry {
                url: absolute.to_string(),
                depth: new_depth,
            });
        }
    }

    links
}

/// Discovers category sections linked from the document
///
/// Only anchors whose href contains `/category/` count. An anchor whose href
/// or text names one of the `priority` categories is recorded under that
/// name (first URL wins). Any other category anchor is recorded under the
/// path segment after `/category/` (first-seen order, one entry per name).
///
/// Returns priority categories in `priority` order, followed by the others.
///
/// # Errors
///
/// Returns a description of the failure if the anchor selector cannot be built.
pub fn extract_categories(
    document: &Html,
    base_url: &Url,
    priority: &[String],
) -> Result<Vec<Category>, String> {
    let mut canonical: Vec<Option<String>> = vec![None; priority.len()];
    let mut others: Vec<Category> = Vec::new();
    let mut other_names: HashSet<String> = HashSet::new();

    let selector =
        Selector::parse("a[href]").map_err(|e| format!("invalid anchor selector: {:?}", e))?;

    for element in document.select(&selector) {
        let Some(raw_href) = element.value().attr("href") else {
            continue;
        };
        let raw_href = raw_href.trim();
        let href = raw_href.to_lowercase();

        if href.is_empty()
            || NON_NAVIGABLE_PREFIXES.iter().any(|p| href.starts_with(p))
            || !href.contains("/category/")
        {
            continue;
        }

        let Some(resolved) = resolve_link(raw_href, base_url) else {
            continue;
        };
        let text = element_text(&element).to_lowercase();

        let mut named = false;
        for (slot, name) in canonical.iter_mut().zip(priority) {
            if href.contains(name.as_str()) || text.contains(name.as_str()) {
                named = true;
                if slot.is_none() {
                    *slot = Some(resolved.to_string());
                }
            }
        }

        if named {
            continue;
        }

        let segment = CATEGORY_SEGMENT
            .captures(&href)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        if let Some(name) = segment {
            if other_names.insert(name.clone()) {
                others.push(Category::new(name, resolved.to_string()));
            }
        }
    }

    Ok(priority
        .iter()
        .zip(canonical)
        .filter_map(|(name, url)| url.map(|url| Category::new(name.clone(), url)))
        .chain(others)
        .collect())
}

/// Scans the document for keyword matches
///
/// Scanned elements are anchors, generic containers and sections, the
/// title, main/article regions, spans, paragraphs and images, plus the
/// description meta tag. Each element is tested on up to six surfaces; every
/// positive test yields one record, so one hit can show up several times
/// (an anchor's text also appears in its enclosing div, for example).
pub fn scan_matches(document: &Html, final_url: &Url, matcher: &KeywordMatcher) -> Vec<MatchRecord> {
    let mut records = Vec::new();
    let source = final_url.as_str();

    if let Ok(selector) = Selector::parse(SCAN_SELECTOR) {
        for element in document.select(&selector) {
            scan_element(&element, final_url, source, matcher, &mut records);
        }
    }

    if let Ok(selector) = Selector::parse(META_DESCRIPTION_SELECTOR) {
        if let Some(meta) = document.select(&selector).next() {
            scan_element(&meta, final_url, source, matcher, &mut records);
        }
    }

    records
}

fn scan_element(
    element: &ElementRef<'_>,
    final_url: &Url,
    source: &str,
    matcher: &KeywordMatcher,
    records: &mut Vec<MatchRecord>,
) {
    let value = element.value();

    if let Some(href) = value.attr("href").filter(|h| !h.is_empty()) {
        if let Some(resolved) = resolve_href(href, final_url) {
            if matcher.matches(resolved.as_str()) {
                records.push(MatchRecord::new(source, MatchKind::ResolvedUrl, resolved.as_str()));
            }
        }
        if matcher.matches(href) {
            records.push(MatchRecord::new(source, MatchKind::Url, href));
        }
    }

    let text = element_text(element);
    if matcher.matches(&text) {
        records.push(MatchRecord::new(source, MatchKind::Content, &text));
    }

    if value.name() == "meta" {
        if let Some(content) = value.attr("content") {
            if matcher.matches(content) {
                records.push(MatchRecord::new(source, MatchKind::MetaContent, content));
            }
        }
    }

    if value.name() == "img" {
        if let Some(alt) = value.attr("alt") {
            if matcher.matches(alt) {
                records.push(MatchRecord::new(source, MatchKind::ImageAlt, alt));
            }
        }
    }

    if let Some(style) = value.attr("style") {
        if let Some(background) = background_image_url(style, final_url) {
            if matcher.matches(background.as_str()) {
                records.push(MatchRecord::new(
                    source,
                    MatchKind::BackgroundImage,
                    background.as_str(),
                ));
            }
        }
    }
}

/// Visible text of an element: text nodes trimmed and joined by one space
fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves the first `url(...)` of an inline style declaring a background image
fn background_image_url(style: &str, base_url: &Url) -> Option<Url> {
    if !style.to_lowercase().contains("background-image") {
        return None;
    }

    let captures = CSS_URL.captures(style)?;
    let reference = captures.get(1)?.as_str();
    resolve_href(reference, base_url)
}
