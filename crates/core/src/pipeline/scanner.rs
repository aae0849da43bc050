//! Library scanning.

use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::PipelineError;
use crate::compat::AudioProperties;
use crate::config::LibraryConfig;
use crate::converter::{Converter, MediaInfo};
use crate::report::{render_report, AudioFileRecord, ScanFailure, ScanReport};

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

/// Recursively collects files under `root` whose extension is in `extensions`.
///
/// Matching is case-insensitive and the leading dot is optional. Results are
/// sorted by file name within each directory. Directories in `excluded` are
/// not descended into. Unreadable entries are logged and skipped.
pub fn discover_audio_files(
    root: &Path,
    extensions: &[String],
    excluded: &[PathBuf],
) -> Vec<PathBuf> {
    let wanted: Vec<String> = extensions.iter().map(|e| normalize_extension(e)).collect();
    let excluded: Vec<PathBuf> = excluded
        .iter()
        .filter_map(|dir| std::fs::canonicalize(dir).ok())
        .collect();
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let skip = entry.depth() > 0
                && entry.file_type().is_dir()
                && std::fs::canonicalize(entry.path())
                    .map(|dir| excluded.contains(&dir))
                    .unwrap_or(false);
            if skip {
                debug!("Skipping excluded directory: {}", entry.path().display());
            }
            !skip
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let ext = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(normalize_extension)
            .unwrap_or_default();
        if wanted.contains(&ext) {
            files.push(entry.into_path());
        }
    }

    files
}

/// Returns the format label for a file when its container agrees with its
/// extension.
pub fn detect_format_label(file_type: &str, info: &MediaInfo) -> Option<&'static str> {
    match file_type {
        ".mp3" if info.has_format("mp3") => Some("MP3"),
        ".wav" | ".wave" if info.has_format("wav") => Some("WAV"),
        ".flac" if info.has_format("flac") => Some("FLAC"),
        ".aif" | ".aiff" if info.has_format("aiff") => Some("AIFF"),
        ".m4a" if ["m4a", "mp4", "mov"].iter().any(|f| info.has_format(f)) => Some("M4A"),
        ".ogg" if info.has_format("ogg") => Some("OGG"),
        _ => None,
    }
}

/// Path relative to `root`, `/`-separated.
fn relative_name(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().to_string(),
    }
}

fn file_type_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}

fn build_record(root: &Path, path: &Path, info: &MediaInfo) -> AudioFileRecord {
    let file_type = file_type_of(path);
    let label = detect_format_label(&file_type, info);
    let bitrate_kbps = match label {
        Some("MP3" | "M4A" | "OGG") => info.bitrate_kbps,
        _ => None,
    };

    AudioFileRecord::new(
        relative_name(root, path),
        info.size_bytes,
        label.map(str::to_string),
        AudioProperties {
            file_type,
            sample_rate: info.sample_rate,
            bit_depth: info.bit_depth,
            channels: info.channels,
            bitrate_kbps,
        },
    )
}

/// Scans a library directory and evaluates every audio file found.
pub struct LibraryScanner<C: Converter> {
    converter: C,
    extensions: Vec<String>,
    excluded_dirs: Vec<PathBuf>,
}

impl<C: Converter> LibraryScanner<C> {
    /// Creates a scanner probing files with `converter`.
    pub fn new(converter: C, config: &LibraryConfig) -> Self {
        Self {
            converter,
            extensions: config.extensions.clone(),
            excluded_dirs: Vec::new(),
        }
    }

    /// Leaves `dir` out of the scan, e.g. the conversion output directory.
    pub fn with_excluded_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded_dirs.push(dir.into());
        self
    }

    /// Probes every audio file under `root`.
    ///
    /// Files that cannot be probed are listed as failures. A missing probe
    /// tool aborts the scan.
    pub async fn scan(&self, root: &Path) -> Result<ScanReport, PipelineError> {
        if !root.is_dir() {
            return Err(PipelineError::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        info!("Scanning directory: {}", root.display());
        let files = discover_audio_files(root, &self.extensions, &self.excluded_dirs);
        info!("Found {} audio files", files.len());

        let mut records = Vec::with_capacity(files.len());
        let mut failures = Vec::new();

        for path in files {
            debug!("Probing {} with {}", path.display(), self.converter.name());
            match self.converter.probe(&path).await {
                Ok(info) => records.push(build_record(root, &path, &info)),
                Err(e) if e.is_tool_missing() => return Err(PipelineError::ToolUnavailable(e)),
                Err(e) => {
                    warn!("Error processing {}: {}", path.display(), e);
                    failures.push(ScanFailure {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let report = ScanReport {
            root_dir: root.to_path_buf(),
            generated_at: Local::now(),
            records,
            failures,
        };

        let summary = report.summary();
        info!(
            "Scan complete: {} files read, {} compatible, {} failed",
            summary.total,
            summary.compatible,
            report.failures.len()
        );

        Ok(report)
    }
}

/// Renders `report` and writes it to `path`, creating parent directories.
pub async fn write_report(report: &ScanReport, path: &Path) -> Result<(), PipelineError> {
    let to_write_error = |source| PipelineError::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(to_write_error)?;
    }
    tokio::fs::write(path, render_report(report))
        .await
        .map_err(to_write_error)?;

    info!("Report saved to: {}", path.display());
    Ok(())
}
