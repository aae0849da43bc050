//! The two batch stages: scanning a library into a report, and converting the
//! files that report flags as incompatible.
//!
//! Both stages run sequentially and await each probe or transcode in turn.
//! Per-file problems are logged and collected; only the errors in
//! [`PipelineError`] abort a stage.
//!
//! # Example
//!
//! ```ignore
//! use cdjcheck_core::converter::FfmpegConverter;
//! use cdjcheck_core::pipeline::{BatchConverter, ConvertOptions, LibraryScanner};
//!
//! let scanner = LibraryScanner::new(FfmpegConverter::with_defaults(), &config.library);
//! let report = scanner.scan(&config.library.root_dir).await?;
//! write_report(&report, &config.report.path).await?;
//!
//! let batch = BatchConverter::new(FfmpegConverter::with_defaults());
//! let summary = batch.run(&ConvertOptions::from_config(&config)).await?;
//! println!("Converted {} files", summary.converted.len());
//! ```

mod batch;
mod scanner;

pub use batch::{BatchConverter, ConversionFailure, ConvertOptions, ConvertSummary};
pub use scanner::{detect_format_label, discover_audio_files, write_report, LibraryScanner};

use std::path::PathBuf;
use thiserror::Error;

use crate::converter::ConverterError;

/// Errors that abort a whole stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The library root does not exist or is not a directory.
    #[error("Directory '{path}' does not exist")]
    RootNotFound { path: PathBuf },

    /// Convert was run before scan.
    #[error("Report not found at {path}. Please run scan first")]
    ReportMissing { path: PathBuf },

    /// ffmpeg or ffprobe is missing or not runnable.
    #[error("Required tool unavailable: {0}")]
    ToolUnavailable(#[source] ConverterError),

    /// The report could not be written.
    #[error("Failed to write report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
