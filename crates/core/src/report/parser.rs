//! Report parsing.
//!
//! Only the per-file blocks are read back. Header, statistics and error
//! sections are skipped because none of their lines start with a field
//! prefix the parser tracks.

use std::str::FromStr;

use super::types::ReportEntry;
use super::{
    BITRATE_PREFIX, BIT_DEPTH_PREFIX, CHANNELS_PREFIX, COMPATIBLE_PREFIX, FILE_PREFIX,
    FORMAT_PREFIX, ISSUES_HEADER, ISSUE_PREFIX, SAMPLE_RATE_PREFIX, SIZE_PREFIX, TYPE_PREFIX,
};

/// Parses the leading token of a field value, treating `None`/`N/A` as absent.
fn first_token<T: FromStr>(value: &str) -> Option<T> {
    let token = value.split_whitespace().next()?;
    match token {
        "None" | "N/A" => None,
        other => other.parse().ok(),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "Yes" => Some(true),
        "No" => Some(false),
        _ => None,
    }
}

/// Recovers the per-file entries from a rendered report.
///
/// Field lines that appear before the first `File:` line are ignored.
/// Entries are returned in report order.
pub fn parse_report(text: &str) -> Vec<ReportEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ReportEntry> = None;
    let mut in_issues = false;

    for line in text.lines() {
        if let Some(filename) = line.strip_prefix(FILE_PREFIX) {
            entries.extend(current.take());
            current = Some(ReportEntry::new(filename.trim_end()));
            in_issues = false;
            continue;
        }

        let Some(entry) = current.as_mut() else {
            continue;
        };

        if let Some(value) = line.strip_prefix(TYPE_PREFIX) {
            entry.properties.file_type = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(FORMAT_PREFIX) {
            entry.format_label = match value.trim() {
                "" | "N/A" => None,
                label => Some(label.to_string()),
            };
        } else if let Some(value) = line.strip_prefix(SIZE_PREFIX) {
            entry.size_mb = first_token(value);
        } else if let Some(value) = line.strip_prefix(SAMPLE_RATE_PREFIX) {
            entry.properties.sample_rate = first_token(value);
        } else if let Some(value) = line.strip_prefix(BIT_DEPTH_PREFIX) {
            entry.properties.bit_depth = first_token(value);
        } else if let Some(value) = line.strip_prefix(CHANNELS_PREFIX) {
            entry.properties.channels = first_token(value);
        } else if let Some(value) = line.strip_prefix(BITRATE_PREFIX) {
            entry.properties.bitrate_kbps = first_token(value);
        } else if let Some(value) = line.strip_prefix(COMPATIBLE_PREFIX) {
            entry.compatible = parse_flag(value);
        } else if line == ISSUES_HEADER {
            in_issues = true;
        } else if let Some(issue) = line.strip_prefix(ISSUE_PREFIX).filter(|_| in_issues) {
            entry.issues.push(issue.to_string());
        } else if line.trim().is_empty() {
            in_issues = false;
        }
    }

    entries.extend(current);
    entries
}
