//! CSV export of match records
//!
//! Every row carries the same timestamp: the moment the export was made.

use crate::state::MatchRecord;
use crate::InspectorError;
use chrono::{DateTime, Local, TimeZone};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column names of the exported file
pub const CSV_HEADER: [&str; 4] = ["Source URL", "Match Type", "Match Context", "Timestamp"];

/// Format of the Timestamp column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the header and one row per record
///
/// # Arguments
///
/// * `records` - Match records in the order they were found
/// * `writer` - Destination for the CSV text
/// * `generated_at` - Export time written into every row
pub fn write_csv<W, Tz>(
    records: &[MatchRecord],
    writer: W,
    generated_at: &DateTime<Tz>,
) -> Result<(), InspectorError>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let timestamp = generated_at.format(TIMESTAMP_FORMAT).to_string();
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([
            record.source_url.as_str(),
            record.kind.label(),
            record.context.as_str(),
            timestamp.as_str(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

/// File name for an export made at `generated_at`
pub fn results_filename<Tz>(generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "crawler_results_{}.csv",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Writes the records to a timestamped CSV file inside `dir`
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(InspectorError)` - The directory or file could not be written
pub fn export_results(records: &[MatchRecord], dir: &Path) -> Result<PathBuf, InspectorError> {
    let now = Local::now();
    std::fs::create_dir_all(dir)?;

    let path = dir.join(results_filename(&now));
    let file = File::create(&path)?;
    write_csv(records, file, &now)?;

    tracing::info!("Exported {} matches to {}", records.len(), path.display());
    Ok(path)
}
