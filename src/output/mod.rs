//! Output module for reporting crawl results
//!
//! This module handles:
//! - Exporting match records as CSV
//! - Summarizing a session as crawl statistics

mod csv_export;
pub mod stats;

pub use csv_export::{export_results, results_filename, write_csv, CSV_HEADER, TIMESTAMP_FORMAT};
pub use stats::{print_statistics, CrawlStatistics};
