//! URL handling module for Smart Inspector
//!
//! This module provides seed normalization, link resolution and the
//! main-site/external classification that drives depth accounting.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{is_external, is_same_site, site_key};
pub use normalize::{normalize_seed, resolve_href, resolve_link};
