//! Mock converter for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::converter::{ConversionJob, ConversionResult, Converter, ConverterError, MediaInfo};

/// A recorded conversion job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    /// The job that was submitted.
    pub job: ConversionJob,
    /// Whether the conversion succeeded.
    pub success: bool,
}

/// Mock implementation of the Converter trait.
///
/// Provides controllable behavior for testing:
/// - Track conversion jobs for assertions
/// - Control probe results per path
/// - Simulate per-file probe and conversion failures
/// - Simulate missing ffmpeg/ffprobe
///
/// Clones share state, so a test can keep a handle after moving one into a
/// scanner or batch converter.
///
/// # Example
///
/// ```rust,ignore
/// use cdjcheck_core::testing::MockConverter;
///
/// let converter = MockConverter::new();
/// converter.set_probe_result("/music/lofi.mp3", info).await;
/// converter.fail_conversion("/music/broken.wav").await;
///
/// let batch = BatchConverter::new(converter.clone());
/// batch.run(&options).await?;
///
/// assert_eq!(converter.conversion_count().await, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockConverter {
    /// Recorded conversions.
    conversions: Arc<RwLock<Vec<RecordedConversion>>>,
    /// Pre-configured probe results by path.
    probe_results: Arc<RwLock<HashMap<PathBuf, MediaInfo>>>,
    /// Paths whose probe fails, with the failure reason.
    probe_failures: Arc<RwLock<HashMap<PathBuf, String>>>,
    /// Input paths whose conversion fails.
    failing_inputs: Arc<RwLock<HashSet<PathBuf>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<ConverterError>>>,
    /// Whether ffmpeg and ffprobe behave as if not installed.
    tools_missing: Arc<RwLock<bool>>,
}

impl MockConverter {
    /// Create a new mock converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded conversions.
    pub async fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.conversions.read().await.clone()
    }

    /// Get the number of conversions attempted.
    pub async fn conversion_count(&self) -> usize {
        self.conversions.read().await.len()
    }

    /// Set a probe result for a specific path.
    pub async fn set_probe_result(&self, path: impl AsRef<Path>, info: MediaInfo) {
        self.probe_results
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), info);
    }

    /// Make probing `path` fail with `reason`.
    pub async fn fail_probe(&self, path: impl AsRef<Path>, reason: impl Into<String>) {
        self.probe_failures
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), reason.into());
    }

    /// Make converting `input_path` fail with a non-zero ffmpeg exit.
    pub async fn fail_conversion(&self, input_path: impl AsRef<Path>) {
        self.failing_inputs
            .write()
            .await
            .insert(input_path.as_ref().to_path_buf());
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    /// Simulate ffmpeg and ffprobe being absent.
    pub async fn set_tools_missing(&self, missing: bool) {
        *self.tools_missing.write().await = missing;
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<ConverterError> {
        self.next_error.write().await.take()
    }

    async fn tools_missing(&self) -> bool {
        *self.tools_missing.read().await
    }

    /// Create a CDJ-compatible MediaInfo matching the file's extension.
    fn create_default_info(path: &Path, size_bytes: u64) -> MediaInfo {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let (format, codec, bit_depth, bitrate_kbps) = match extension.as_str() {
            "mp3" => ("mp3", "mp3", None, Some(320.0)),
            "flac" => ("flac", "flac", Some(16), None),
            "aif" | "aiff" => ("aiff", "pcm_s16be", Some(16), None),
            "m4a" => ("mov,mp4,m4a,3gp,3g2,mj2", "aac", None, Some(256.0)),
            "ogg" => ("ogg", "vorbis", None, Some(192.0)),
            _ => ("wav", "pcm_s16le", Some(16), Some(1411.2)),
        };

        MediaInfo {
            path: path.to_path_buf(),
            size_bytes,
            format: format.to_string(),
            audio_codec: Some(codec.to_string()),
            sample_rate: Some(44100),
            bit_depth,
            channels: Some(2),
            bitrate_kbps,
        }
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe(&self, path: &Path) -> Result<MediaInfo, ConverterError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        if self.tools_missing().await {
            return Err(ConverterError::FfprobeNotFound {
                path: PathBuf::from("ffprobe"),
            });
        }
        if let Some(reason) = self.probe_failures.read().await.get(path) {
            return Err(ConverterError::probe_failed(reason.clone()));
        }

        // Check for pre-configured result
        if let Some(info) = self.probe_results.read().await.get(path) {
            let mut info = info.clone();
            info.path = path.to_path_buf();
            return Ok(info);
        }

        let size_bytes = tokio::fs::metadata(path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        Ok(Self::create_default_info(path, size_bytes))
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
        let missing = self.tools_missing().await;
        let fails = self.failing_inputs.read().await.contains(&job.input_path);
        let error = match self.take_error().await {
            Some(err) => Some(err),
            None if missing => Some(ConverterError::FfmpegNotFound {
                path: PathBuf::from("ffmpeg"),
            }),
            None if fails => Some(ConverterError::conversion_failed(
                "FFmpeg exited with code: Some(1)",
                Some(format!(
                    "{}: Invalid data found when processing input",
                    job.input_path.display()
                )),
            )),
            None => None,
        };

        if let Some(err) = error {
            self.conversions.write().await.push(RecordedConversion {
                job,
                success: false,
            });
            return Err(err);
        }

        // Record the conversion
        self.conversions.write().await.push(RecordedConversion {
            job: job.clone(),
            success: true,
        });

        Ok(ConversionResult {
            output_format: job.plan.target.extension().to_string(),
            input_path: job.input_path,
            output_path: job.output_path,
            output_size_bytes: 10 * 1024 * 1024,
            duration_ms: 0,
        })
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        if self.tools_missing().await {
            return Err(ConverterError::FfmpegNotFound {
                path: PathBuf::from("ffmpeg"),
            });
        }
        Ok(())
    }
}
