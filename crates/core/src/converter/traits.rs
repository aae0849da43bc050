//! Trait definitions for the converter module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ConverterError;
use super::types::{ConversionJob, ConversionResult, MediaInfo};

/// A converter that can inspect and transcode audio files.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Probes an audio file to get its technical metadata.
    async fn probe(&self, path: &Path) -> Result<MediaInfo, ConverterError>;

    /// Transcodes a file according to the job's plan.
    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError>;

    /// Validates that the transcoder is installed and runnable.
    async fn validate(&self) -> Result<(), ConverterError>;
}
