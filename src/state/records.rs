use chrono::{DateTime, Utc};
use std::fmt;

/// Longest context stored on a match record, in characters
pub const MAX_CONTEXT_CHARS: usize = 200;

/// The surface of a page a keyword was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// An href after resolving it against the page URL
    ResolvedUrl,

    /// An href exactly as written in the markup
    Url,

    /// Visible element text
    Content,

    /// The `content` attribute of the description meta tag
    MetaContent,

    /// An image's alt text
    ImageAlt,

    /// A `background-image: url(...)` reference in an inline style
    BackgroundImage,
}

impl MatchKind {
    /// Human-readable label, used for exports and the status feed
    pub fn label(&self) -> &'static str {
        match self {
            Self::ResolvedUrl => "Keyword in Resolved URL",
            Self::Url => "Keyword in URL",
            Self::Content => "Keyword in content",
            Self::MetaContent => "Keyword in meta content",
            Self::ImageAlt => "Keyword in image alt",
            Self::BackgroundImage => "Keyword in background image",
        }
    }

    pub fn all() -> [Self; 6] {
        [
            Self::ResolvedUrl,
            Self::Url,
            Self::Content,
            Self::MetaContent,
            Self::ImageAlt,
            Self::BackgroundImage,
        ]
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One keyword hit
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    /// Final URL of the page the hit was found on
    pub source_url: String,
    pub kind: MatchKind,
    /// The matching text, at most [`MAX_CONTEXT_CHARS`] characters
    pub context: String,
    pub found_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(source_url: impl Into<String>, kind: MatchKind, context: &str) -> Self {
        Self {
            source_url: source_url.into(),
            kind,
            context: truncate_context(context),
            found_at: Utc::now(),
        }
    }
}

/// A category section discovered on the site's first page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub url: String,
}

impl Category {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Cuts text to [`MAX_CONTEXT_CHARS`], marking the cut with `...`
pub fn truncate_context(text: &str) -> String {
    if text.chars().count() <= MAX_CONTEXT_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(MAX_CONTEXT_CHARS - 3).collect();
    cut.push_str("...");
    cut
}
