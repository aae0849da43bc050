//! Converter module for probing and transcoding audio files.
//!
//! This module provides the `Converter` trait and an FFmpeg-backed
//! implementation. `probe` extracts technical metadata with ffprobe;
//! `convert` runs a single ffmpeg transcode described by a [`ConversionPlan`].
//!
//! The planner ([`plan_conversion`]) decides the target format and the
//! minimal set of ffmpeg parameters that make a file CDJ-compatible.
//!
//! # Example
//!
//! ```ignore
//! use cdjcheck_core::converter::{plan_conversion, ConversionJob, Converter, FfmpegConverter};
//!
//! let converter = FfmpegConverter::with_defaults();
//! converter.validate().await?;
//!
//! let info = converter.probe(Path::new("/music/track.mp3")).await?;
//! let plan = plan_conversion(&properties);
//! let job = ConversionJob::new(input_path, output_dir, plan);
//! let result = converter.convert(job).await?;
//! println!("Converted in {} ms", result.duration_ms);
//! ```

mod config;
mod error;
mod ffmpeg;
mod plan;
mod traits;
mod types;

pub use config::ConverterConfig;
pub use error::ConverterError;
pub use ffmpeg::FfmpegConverter;
pub use plan::{plan_conversion, ConversionPlan};
pub use traits::Converter;
pub use types::{ConversionJob, ConversionResult, MediaInfo};
