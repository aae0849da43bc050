//! Testing utilities and mock implementations.
//!
//! [`MockConverter`] stands in for ffmpeg/ffprobe so the scan and convert
//! stages can be exercised without either installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use cdjcheck_core::testing::{fixtures, MockConverter};
//!
//! let converter = MockConverter::new();
//! converter
//!     .set_probe_result("/music/lofi.mp3", fixtures::media_info("/music/lofi.mp3", "mp3"))
//!     .await;
//! ```

mod mock_converter;

pub use mock_converter::{MockConverter, RecordedConversion};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::PathBuf;

    use crate::converter::MediaInfo;

    /// Stereo 44.1 kHz media info for `path` with the given container format.
    pub fn media_info(path: &str, format: &str) -> MediaInfo {
        MediaInfo {
            path: PathBuf::from(path),
            size_bytes: 8 * 1024 * 1024,
            format: format.to_string(),
            audio_codec: None,
            sample_rate: Some(44100),
            bit_depth: None,
            channels: Some(2),
            bitrate_kbps: None,
        }
    }
}
