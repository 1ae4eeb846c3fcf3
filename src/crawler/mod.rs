//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeout and content-type gating
//! - Link, category and keyword extraction from parsed pages
//! - The breadth-first frontier and visited set
//! - The tick-driven controller that ties them together

mod controller;
mod extractor;
mod fetcher;
mod frontier;

pub use controller::{Controller, TickReport};
pub use extractor::{extract_categories, extract_links, scan_matches};
pub use fetcher::{build_http_client, is_html_content_type, FetchedPage, Fetcher};
pub use frontier::{Frontier, FrontierEntry, DEFAULT_MAX_DEPTH};
