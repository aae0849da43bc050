//! Batch conversion of the files a report flags as incompatible.

use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::PipelineError;
use crate::config::Config;
use crate::converter::{plan_conversion, ConversionJob, ConversionResult, Converter, ConverterError};
use crate::report::parse_report;

/// Inputs for a conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Library root the report's file names are relative to.
    pub root_dir: PathBuf,
    /// Report written by the scan stage.
    pub report_path: PathBuf,
    /// Directory converted files are written to.
    pub output_dir: PathBuf,
    /// Log the planned commands without running them.
    pub dry_run: bool,
}

impl ConvertOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            root_dir: config.library.root_dir.clone(),
            report_path: config.report.path.clone(),
            output_dir: config.converter.output_dir.clone(),
            dry_run: false,
        }
    }
}

/// A file whose transcode failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionFailure {
    pub filename: String,
    pub reason: String,
}

/// Outcome of a conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertSummary {
    /// File blocks found in the report.
    pub total_entries: usize,
    /// Entries flagged as incompatible.
    pub incompatible: usize,
    pub converted: Vec<ConversionResult>,
    pub failed: Vec<ConversionFailure>,
    /// Report file names whose original no longer exists.
    pub skipped: Vec<String>,
    /// Jobs that would have run, in dry-run mode.
    pub planned: Vec<ConversionJob>,
}

fn log_install_hints(e: &ConverterError) {
    error!("{}", e);
    error!("ffmpeg is not installed or not accessible in your system PATH.");
    error!("Please install ffmpeg:");
    error!("- macOS: brew install ffmpeg");
    error!("- Ubuntu/Debian: sudo apt-get install ffmpeg");
    error!("- Windows: Download from https://ffmpeg.org/download.html");
}

/// Converts every incompatible file listed in a scan report.
pub struct BatchConverter<C: Converter> {
    converter: C,
}

impl<C: Converter> BatchConverter<C> {
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    /// Checks the transcoder, logging install hints when it is missing.
    async fn ensure_transcoder(&self) -> Result<(), PipelineError> {
        self.converter.validate().await.map_err(|e| {
            log_install_hints(&e);
            PipelineError::ToolUnavailable(e)
        })
    }

    async fn read_report(path: &Path) -> Result<String, PipelineError> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PipelineError::ReportMissing {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => Err(PipelineError::Io(e)),
        }
    }

    /// Runs the conversion stage.
    ///
    /// Missing originals are skipped and failed transcodes are collected; both
    /// leave the rest of the batch running.
    pub async fn run(&self, options: &ConvertOptions) -> Result<ConvertSummary, PipelineError> {
        if !options.root_dir.is_dir() {
            return Err(PipelineError::RootNotFound {
                path: options.root_dir.clone(),
            });
        }
        info!("Processing directory: {}", options.root_dir.display());

        if !options.dry_run {
            self.ensure_transcoder().await?;
        }

        let text = Self::read_report(&options.report_path).await?;
        let entries = parse_report(&text);
        let incompatible: Vec<_> = entries.iter().filter(|e| e.needs_conversion()).collect();

        let mut summary = ConvertSummary {
            total_entries: entries.len(),
            incompatible: incompatible.len(),
            ..Default::default()
        };

        if incompatible.is_empty() {
            info!("No incompatible files found. All files are CDJ-compatible.");
            return Ok(summary);
        }
        info!("Found {} incompatible files to convert.", incompatible.len());

        if !options.dry_run {
            tokio::fs::create_dir_all(&options.output_dir)
                .await
                .map_err(|source| PipelineError::OutputDirectory {
                    path: options.output_dir.clone(),
                    source,
                })?;
            info!(
                "Created/verified output directory at: {}",
                options.output_dir.display()
            );
        }

        for entry in incompatible {
            let input_path = options.root_dir.join(&entry.filename);
            if !input_path.exists() {
                warn!("File not found: {}", entry.filename);
                summary.skipped.push(entry.filename.clone());
                continue;
            }

            let plan = plan_conversion(&entry.properties);
            let job = ConversionJob::new(input_path, &options.output_dir, plan);

            if options.dry_run {
                info!(
                    "Would run: {} {}",
                    self.converter.name(),
                    job.ffmpeg_args().join(" ")
                );
                summary.planned.push(job);
                continue;
            }

            info!(
                "Converting {} to {}",
                job.input_path.display(),
                job.output_path.display()
            );
            match self.converter.convert(job).await {
                Ok(result) => {
                    info!(
                        "Successfully converted {} to {} ({} bytes, {} ms)",
                        entry.filename,
                        result.output_path.display(),
                        result.output_size_bytes,
                        result.duration_ms
                    );
                    summary.converted.push(result);
                }
                Err(e) if e.is_tool_missing() => {
                    log_install_hints(&e);
                    return Err(PipelineError::ToolUnavailable(e));
                }
                Err(e) => {
                    error!("Failed to convert {}: {}", entry.filename, e);
                    if let Some(stderr) = e.diagnostics() {
                        error!("ffmpeg output: {}", stderr);
                    }
                    summary.failed.push(ConversionFailure {
                        filename: entry.filename.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Conversion complete: {} converted, {} failed, {} skipped",
            summary.converted.len(),
            summary.failed.len(),
            summary.skipped.len()
        );

        Ok(summary)
    }
}
