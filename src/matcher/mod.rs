//! Keyword matching
//!
//! A text matches when any keyword occurs in it as a case-insensitive
//! substring, or when any keyword reaches the fuzzy threshold on
//! [`partial_ratio`]. The fuzzy arm tolerates spacing variants and small
//! typos ("go with guide", "gowithgiude") while rejecting unrelated text.

mod fuzzy;

pub use fuzzy::partial_ratio;

use crate::config::MatcherConfig;

/// Default minimum partial-ratio score for an approximate hit
pub const DEFAULT_THRESHOLD: u8 = 85;

/// Case-insensitive exact + approximate keyword detector
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    /// Lowercased keywords
    keywords: Vec<String>,
    threshold: u8,
}

impl KeywordMatcher {
    /// Creates a matcher over the given keywords
    pub fn new<I, S>(keywords: I, threshold: u8) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            threshold,
        }
    }

    /// Builds a matcher from the `[matcher]` config section
    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::new(&config.keywords, config.fuzzy_threshold)
    }

    /// The lowercased keywords this matcher looks for
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Returns true if `text` contains any keyword exactly or approximately
    ///
    /// Empty (or whitespace-only) text never matches.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let text = text.to_lowercase();

        let exact = self.keywords.iter().any(|kw| text.contains(kw.as_str()));
        exact
            || self
                .keywords
                .iter()
                .any(|kw| partial_ratio(&text, kw) >= self.threshold)
    }
}

/// One-shot form of [`KeywordMatcher::matches`] at the default threshold
///
/// # Examples
///
/// ```
/// use smart_inspector::matcher::contains_keyword;
///
/// assert!(contains_keyword("Visit Go With Guide today", &["gowithguide"]));
/// assert!(!contains_keyword("completely unrelated text", &["gowithguide"]));
/// ```
pub fn contains_keyword<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    KeywordMatcher::new(keywords, DEFAULT_THRESHOLD).matches(text)
}
