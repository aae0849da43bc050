//! Types for the converter module.

use std::path::{Path, PathBuf};

use super::plan::ConversionPlan;

/// Technical information about an audio file, as reported by ffprobe.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    /// File path.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Container format names (e.g. `"mov,mp4,m4a,3gp,3g2,mj2"`).
    pub format: String,
    /// Audio codec (if present).
    pub audio_codec: Option<String>,
    /// Sample rate in Hz (if present).
    pub sample_rate: Option<u32>,
    /// Bits per sample (if the codec has one).
    pub bit_depth: Option<u32>,
    /// Number of channels (if present).
    pub channels: Option<u32>,
    /// Bitrate in kbps, rounded to two decimals (if present).
    pub bitrate_kbps: Option<f64>,
}

impl MediaInfo {
    /// Whether any of the container's format names equals `name`.
    pub fn has_format(&self, name: &str) -> bool {
        self.format.split(',').any(|f| f.trim() == name)
    }
}

/// A single transcode request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionJob {
    /// Input file path.
    pub input_path: PathBuf,
    /// Output file path.
    pub output_path: PathBuf,
    /// Target format and ffmpeg parameters.
    pub plan: ConversionPlan,
}

impl ConversionJob {
    /// Creates a job writing `<input-stem>.<target>` into `output_dir`.
    pub fn new(input_path: PathBuf, output_dir: &Path, plan: ConversionPlan) -> Self {
        let output_path = output_dir.join(plan.output_file_name(&input_path));
        Self {
            input_path,
            output_path,
            plan,
        }
    }

    /// Arguments passed to ffmpeg: `-i <input> -y <params...> <output>`.
    pub fn ffmpeg_args(&self) -> Vec<String> {
        let mut args = vec![
            "-i".to_string(),
            self.input_path.to_string_lossy().to_string(),
            "-y".to_string(), // Overwrite output
        ];
        args.extend(self.plan.params.iter().cloned());
        args.push(self.output_path.to_string_lossy().to_string());
        args
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Input file path.
    pub input_path: PathBuf,
    /// Output file path.
    pub output_path: PathBuf,
    /// Output file size in bytes.
    pub output_size_bytes: u64,
    /// Conversion duration in milliseconds.
    pub duration_ms: u64,
    /// Output format used.
    pub output_format: String,
}
