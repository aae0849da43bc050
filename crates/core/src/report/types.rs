//! Types for the report module.

use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::compat::{evaluate, AudioProperties, Compatibility};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// One successfully probed audio file with its compatibility verdict.
///
/// The verdict is computed from the properties on construction and cannot be
/// replaced, so the recorded flag always matches a fresh evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFileRecord {
    /// Path relative to the scanned root, `/`-separated.
    pub filename: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format label (e.g. `"MP3"`), when the container matches the extension.
    pub format_label: Option<String>,
    properties: AudioProperties,
    compatibility: Compatibility,
}

impl AudioFileRecord {
    /// Creates a record and evaluates it against the rule table.
    pub fn new(
        filename: impl Into<String>,
        size_bytes: u64,
        format_label: Option<String>,
        properties: AudioProperties,
    ) -> Self {
        let compatibility = evaluate(&properties);
        Self {
            filename: filename.into(),
            size_bytes,
            format_label,
            properties,
            compatibility,
        }
    }

    /// Technical properties the verdict was computed from.
    pub fn properties(&self) -> &AudioProperties {
        &self.properties
    }

    /// The compatibility verdict.
    pub fn compatibility(&self) -> &Compatibility {
        &self.compatibility
    }

    /// Shorthand for `compatibility().is_compatible()`.
    pub fn is_compatible(&self) -> bool {
        self.compatibility.is_compatible()
    }

    /// File size in MiB.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_MB
    }
}

/// A file that was found but could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Error: {})", self.path.display(), self.reason)
    }
}

/// Everything the scan stage learned about a directory tree.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Directory that was scanned.
    pub root_dir: PathBuf,
    /// When the scan finished.
    pub generated_at: DateTime<Local>,
    /// Readable audio files, in discovery order.
    pub records: Vec<AudioFileRecord>,
    /// Files that could not be read.
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    /// Aggregates counts over the readable files.
    pub fn summary(&self) -> ScanSummary {
        let mut summary = ScanSummary {
            total: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            let props = record.properties();
            *summary
                .file_types
                .entry(props.file_type.clone())
                .or_default() += 1;
            if let Some(rate) = props.sample_rate {
                *summary.sample_rates.entry(rate).or_default() += 1;
            }
            if let Some(depth) = props.bit_depth {
                *summary.bit_depths.entry(depth).or_default() += 1;
            }
            if let Some(channels) = props.channels {
                *summary.channels.entry(channels).or_default() += 1;
            }
            if record.is_compatible() {
                summary.compatible += 1;
            }
        }
        summary
    }
}

/// Aggregate statistics printed at the top of the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSummary {
    /// Files per extension.
    pub file_types: BTreeMap<String, usize>,
    /// Files per known sample rate.
    pub sample_rates: BTreeMap<u32, usize>,
    /// Files per known bit depth.
    pub bit_depths: BTreeMap<u32, usize>,
    /// Files per known channel count.
    pub channels: BTreeMap<u32, usize>,
    /// Readable files.
    pub total: usize,
    /// Readable files passing every rule.
    pub compatible: usize,
}

impl ScanSummary {
    /// Readable files failing at least one rule.
    pub fn incompatible(&self) -> usize {
        self.total - self.compatible
    }

    /// Percentage of compatible files, 0 when nothing was scanned.
    pub fn compatibility_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.compatible as f64 / self.total as f64 * 100.0
        }
    }
}

/// One file block recovered from a report.
///
/// Fields that were missing or unparsable are `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportEntry {
    pub filename: String,
    pub format_label: Option<String>,
    pub size_mb: Option<f64>,
    /// Properties as recorded; `file_type` is empty when the `Type` line is missing.
    pub properties: AudioProperties,
    /// The recorded `CDJ Compatible` flag.
    pub compatible: Option<bool>,
    pub issues: Vec<String>,
}

impl ReportEntry {
    /// Creates an entry with only the filename known.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Default::default()
        }
    }

    /// Whether the report flagged this file as incompatible.
    pub fn needs_conversion(&self) -> bool {
        self.compatible == Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(file_type: &str, rate: Option<u32>, depth: Option<u32>, ch: Option<u32>) -> AudioFileRecord {
        AudioFileRecord::new(
            format!("track{}", file_type),
            3 * 1024 * 1024,
            None,
            AudioProperties {
                file_type: file_type.to_string(),
                sample_rate: rate,
                bit_depth: depth,
                channels: ch,
                bitrate_kbps: None,
            },
        )
    }

    #[test]
    fn test_record_evaluates_on_construction() {
        let ok = record(".wav", Some(44100), Some(16), Some(2));
        assert!(ok.is_compatible());
        assert!((ok.size_mb() - 3.0).abs() < f64::EPSILON);

        let bad = record(".wav", Some(22050), Some(16), Some(2));
        assert!(!bad.is_compatible());
        assert_eq!(bad.compatibility().issues().len(), 1);
    }

    #[test]
    fn test_summary_counts_known_values_only() {
        let report = ScanReport {
            root_dir: PathBuf::from("/music"),
            generated_at: Local::now(),
            records: vec![
                record(".wav", Some(44100), Some(16), Some(2)),
                record(".wav", Some(48000), Some(24), Some(2)),
                record(".flac", None, None, Some(1)),
            ],
            failures: vec![],
        };
        let summary = report.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.compatible, 2);
        assert_eq!(summary.incompatible(), 1);
        assert_eq!(summary.file_types.get(".wav"), Some(&2));
        assert_eq!(summary.sample_rates.len(), 2);
        assert_eq!(summary.bit_depths.values().sum::<usize>(), 2);
        assert_eq!(summary.channels.get(&2), Some(&2));
        assert!((summary.compatibility_rate() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_empty_summary_rate() {
        assert_eq!(ScanSummary::default().compatibility_rate(), 0.0);
    }

    #[test]
    fn test_scan_failure_display() {
        let failure = ScanFailure {
            path: PathBuf::from("/music/broken.mp3"),
            reason: "Failed to probe media file: unreadable or unsupported file".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "/music/broken.mp3 (Error: Failed to probe media file: unreadable or unsupported file)"
        );
    }

    #[test]
    fn test_entry_needs_conversion() {
        let mut entry = ReportEntry::new("a.mp3");
        assert!(!entry.needs_conversion());
        entry.compatible = Some(true);
        assert!(!entry.needs_conversion());
        entry.compatible = Some(false);
        assert!(entry.needs_conversion());
    }
}
