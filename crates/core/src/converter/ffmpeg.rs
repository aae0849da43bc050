//! FFmpeg-based converter implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::Converter;
use super::types::{ConversionJob, ConversionResult, MediaInfo};

/// FFmpeg-based converter implementation.
pub struct FfmpegConverter {
    config: ConverterConfig,
}

impl FfmpegConverter {
    /// Creates a new FFmpeg converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Parses ffprobe JSON output into MediaInfo.
    fn parse_probe_output(
        path: &Path,
        size_bytes: u64,
        output: &str,
    ) -> Result<MediaInfo, ConverterError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            format: ProbeFormat,
            #[serde(default)]
            streams: Vec<ProbeStream>,
        }

        #[derive(Deserialize)]
        struct ProbeFormat {
            format_name: String,
            bit_rate: Option<String>,
        }

        #[derive(Deserialize)]
        struct ProbeStream {
            codec_type: String,
            codec_name: Option<String>,
            bit_rate: Option<String>,
            sample_rate: Option<String>,
            channels: Option<u32>,
            bits_per_sample: Option<u32>,
            bits_per_raw_sample: Option<String>,
        }

        let probe: ProbeOutput =
            serde_json::from_str(output).map_err(|e| ConverterError::ParseError {
                reason: format!("Failed to parse ffprobe output: {}", e),
            })?;

        let stream = probe
            .streams
            .iter()
            .find(|s| s.codec_type == "audio")
            .ok_or_else(|| ConverterError::probe_failed("no audio stream"))?;

        // PCM reports bits_per_sample; FLAC and ALAC report bits_per_raw_sample.
        // Lossy codecs report 0 for both.
        let bit_depth = stream
            .bits_per_raw_sample
            .as_ref()
            .and_then(|b| b.parse::<u32>().ok())
            .filter(|b| *b > 0)
            .or(stream.bits_per_sample.filter(|b| *b > 0));

        let bitrate_kbps = stream
            .bit_rate
            .as_ref()
            .or(probe.format.bit_rate.as_ref())
            .and_then(|b| b.parse::<f64>().ok())
            .filter(|b| *b > 0.0)
            .map(|bps| (bps / 1000.0 * 100.0).round() / 100.0);

        Ok(MediaInfo {
            path: path.to_path_buf(),
            size_bytes,
            format: probe.format.format_name,
            audio_codec: stream.codec_name.clone(),
            sample_rate: stream
                .sample_rate
                .as_ref()
                .and_then(|r| r.parse::<u32>().ok()),
            bit_depth,
            channels: stream.channels,
            bitrate_kbps,
        })
    }

    /// Runs a single ffmpeg invocation.
    async fn run_conversion(&self, job: &ConversionJob) -> Result<ConversionResult, ConverterError> {
        let start = Instant::now();

        if !tokio::fs::try_exists(&job.input_path).await? {
            return Err(ConverterError::InputNotFound {
                path: job.input_path.clone(),
            });
        }

        // Ensure output directory exists
        if let Some(parent) = job.output_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|_| {
                ConverterError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                }
            })?;
        }

        let args = job.ffmpeg_args();
        debug!(
            "Running ffmpeg command: {} {}",
            self.config.ffmpeg_path.display(),
            args.join(" ")
        );

        let child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConverterError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    ConverterError::Io(e)
                }
            })?;

        // Dropping the child on timeout kills it.
        let output = match self.config.timeout_secs {
            Some(timeout_secs) => timeout(
                Duration::from_secs(timeout_secs),
                child.wait_with_output(),
            )
            .await
            .map_err(|_| ConverterError::Timeout { timeout_secs })??,
            None => child.wait_with_output().await?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ConverterError::conversion_failed(
                format!("FFmpeg exited with code: {:?}", output.status.code()),
                if stderr.is_empty() { None } else { Some(stderr) },
            ));
        }

        // Verify output exists and get size
        let output_meta = tokio::fs::metadata(&job.output_path)
            .await
            .map_err(|_| ConverterError::conversion_failed("Output file not created", None))?;

        Ok(ConversionResult {
            input_path: job.input_path.clone(),
            output_path: job.output_path.clone(),
            output_size_bytes: output_meta.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_format: job.plan.target.extension().to_string(),
        })
    }
}

#[async_trait]
impl Converter for FfmpegConverter {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn probe(&self, path: &Path) -> Result<MediaInfo, ConverterError> {
        let size_bytes = match tokio::fs::metadata(path).await {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConverterError::InputNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(ConverterError::Io(e)),
        };

        debug!(
            "Running ffprobe command: {} -v quiet -print_format json -show_format -show_streams {}",
            self.config.ffprobe_path.display(),
            path.display()
        );

        let output = Command::new(&self.config.ffprobe_path)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConverterError::FfprobeNotFound {
                        path: self.config.ffprobe_path.clone(),
                    }
                } else {
                    ConverterError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConverterError::probe_failed(if stderr.trim().is_empty() {
                "unreadable or unsupported file".to_string()
            } else {
                format!("ffprobe failed: {}", stderr.trim())
            }));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_probe_output(path, size_bytes, &stdout)
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
        self.run_conversion(&job).await
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await;

        match result {
            Ok(output) if output.status.success() => Ok(()),
            Ok(output) => {
                debug!("ffmpeg -version exited with {:?}", output.status.code());
                Err(ConverterError::FfmpegNotFound {
                    path: self.config.ffmpeg_path.clone(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConverterError::FfmpegNotFound {
                    path: self.config.ffmpeg_path.clone(),
                })
            }
            Err(e) => Err(ConverterError::Io(e)),
        }
    }
}
