//! The text report handed from the scan stage to the convert stage.
//!
//! The report is a line-oriented, whitespace-significant format. The
//! generator and the parser share the field prefixes below; changing one of
//! them breaks reports written by earlier runs.

mod generator;
mod parser;
mod types;

pub use generator::{render_record, render_report};
pub use parser::parse_report;
pub use types::{AudioFileRecord, ReportEntry, ScanFailure, ScanReport, ScanSummary};

pub(crate) const FILE_PREFIX: &str = "File: ";
pub(crate) const TYPE_PREFIX: &str = "  Type: ";
pub(crate) const FORMAT_PREFIX: &str = "  Format: ";
pub(crate) const SIZE_PREFIX: &str = "  Size: ";
pub(crate) const SAMPLE_RATE_PREFIX: &str = "  Sample Rate: ";
pub(crate) const BIT_DEPTH_PREFIX: &str = "  Bit Depth: ";
pub(crate) const CHANNELS_PREFIX: &str = "  Channels: ";
pub(crate) const BITRATE_PREFIX: &str = "  Bitrate: ";
pub(crate) const COMPATIBLE_PREFIX: &str = "  CDJ Compatible: ";
pub(crate) const ISSUES_HEADER: &str = "  Compatibility Issues:";
pub(crate) const ISSUE_PREFIX: &str = "    - ";
