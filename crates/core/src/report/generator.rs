//! Report rendering.

use super::types::{AudioFileRecord, ScanReport};
use super::{
    BITRATE_PREFIX, BIT_DEPTH_PREFIX, CHANNELS_PREFIX, COMPATIBLE_PREFIX, FILE_PREFIX,
    FORMAT_PREFIX, ISSUES_HEADER, ISSUE_PREFIX, SAMPLE_RATE_PREFIX, SIZE_PREFIX, TYPE_PREFIX,
};

fn or_none<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

/// Renders the per-file block, without the trailing blank separator.
pub fn render_record(record: &AudioFileRecord) -> Vec<String> {
    let props = record.properties();
    let mut lines = vec![
        format!("{}{}", FILE_PREFIX, record.filename),
        format!("{}{}", TYPE_PREFIX, props.file_type),
        format!(
            "{}{}",
            FORMAT_PREFIX,
            record.format_label.as_deref().unwrap_or("N/A")
        ),
        format!("{}{:.2} MB", SIZE_PREFIX, record.size_mb()),
        format!("{}{} Hz", SAMPLE_RATE_PREFIX, or_none(props.sample_rate)),
        format!("{}{} bits", BIT_DEPTH_PREFIX, or_none(props.bit_depth)),
        format!("{}{}", CHANNELS_PREFIX, or_none(props.channels)),
    ];

    if let Some(bitrate) = props.bitrate_kbps {
        lines.push(format!("{}{} kbps", BITRATE_PREFIX, bitrate));
    }

    let compatibility = record.compatibility();
    lines.push(format!(
        "{}{}",
        COMPATIBLE_PREFIX,
        if compatibility.is_compatible() { "Yes" } else { "No" }
    ));

    if !compatibility.is_compatible() {
        lines.push(ISSUES_HEADER.to_string());
        lines.extend(
            compatibility
                .messages()
                .into_iter()
                .map(|issue| format!("{}{}", ISSUE_PREFIX, issue)),
        );
    }

    lines
}

/// Renders the full text report for a scan.
pub fn render_report(report: &ScanReport) -> String {
    let summary = report.summary();
    let mut lines: Vec<String> = vec![
        "=== Audio Files Technical Report ===".to_string(),
        String::new(),
        format!(
            "Generated on: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S")
        ),
        format!("Directory scanned: {}", report.root_dir.display()),
        format!("Total audio files found: {}", report.records.len()),
    ];
    if report.failures.is_empty() {
        lines.push("All files processed successfully.".to_string());
    } else {
        lines.push(format!("Files with errors: {}", report.failures.len()));
    }
    lines.push(String::new());

    lines.push("=== Summary Statistics ===".to_string());
    lines.push(String::new());
    lines.push("File Types:".to_string());
    for (file_type, count) in &summary.file_types {
        lines.push(format!("  {}: {} files", file_type, count));
    }
    lines.push(String::new());
    lines.push("Sample Rates:".to_string());
    for (rate, count) in &summary.sample_rates {
        lines.push(format!("  {} Hz: {} files", rate, count));
    }
    lines.push(String::new());
    lines.push("Bit Depths:".to_string());
    for (depth, count) in &summary.bit_depths {
        lines.push(format!("  {} bits: {} files", depth, count));
    }
    lines.push(String::new());
    lines.push("Channel Configurations:".to_string());
    for (channels, count) in &summary.channels {
        lines.push(format!("  {} channels: {} files", channels, count));
    }
    lines.push(String::new());

    lines.push("=== CDJ Compatibility ===".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Compatible files: {} of {} ({:.1}%)",
        summary.compatible,
        summary.total,
        summary.compatibility_rate()
    ));
    lines.push(format!("Incompatible files: {}", summary.incompatible()));
    lines.push(String::new());

    lines.push("=== Detailed File Information ===".to_string());
    lines.push(String::new());
    for record in &report.records {
        lines.extend(render_record(record));
        lines.push(String::new());
    }

    if !report.failures.is_empty() {
        lines.push("=== Files with Errors ===".to_string());
        lines.push(String::new());
        for failure in &report.failures {
            lines.push(format!("- {}", failure));
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
