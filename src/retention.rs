//! Log file retention management
//!
//! Opt-in cleanup of old day files. The logger itself never deletes
//! anything; files accumulate until the host calls one of these.

use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Clean up day files older than the default retention period
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs(logs_dir: &Path) -> Result<usize> {
    cleanup_old_logs_with_retention(logs_dir, DEFAULT_RETENTION_DAYS)
}

/// Clean up day files older than the specified number of days
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs_with_retention(logs_dir: &Path, retention_days: u64) -> Result<usize> {
    let cutoff = Local::now().date_naive() - Duration::days(retention_days as i64);
    cleanup_before(logs_dir, cutoff)
}

/// Delete day files dated strictly before `cutoff`
///
/// The cutoff compares against the date encoded in the file name, not the
/// file's modification time, so a back-dated file is removed even if it was
/// touched recently. Files not matching the `YYYYMMDD.log` scheme are left
/// alone. A missing directory counts as nothing to delete.
fn cleanup_before(logs_dir: &Path, cutoff: NaiveDate) -> Result<usize> {
    if !logs_dir.exists() {
        return Ok(0);
    }

    let mut deleted_count = 0;

    for entry in fs::read_dir(logs_dir)? {
        let entry = entry?;
        let path = entry.path();

        let Some(date) = day_file_date(&path) else {
            continue;
        };

        if date < cutoff && fs::remove_file(&path).is_ok() {
            deleted_count += 1;
        }
    }

    Ok(deleted_count)
}

/// Parse the date out of a `YYYYMMDD.log` file name
fn day_file_date(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".log")?;
    if stem.len() != 8 || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(stem, "%Y%m%d").ok()
}
