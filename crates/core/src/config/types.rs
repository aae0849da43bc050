use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::converter::ConverterConfig;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
}

/// Audio library configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Directory scanned recursively and read from during conversion
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,
    /// File extensions treated as audio (case-insensitive, leading dot optional)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            extensions: default_extensions(),
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_extensions() -> Vec<String> {
    [".mp3", ".wav", ".wave", ".flac", ".aif", ".aiff", ".m4a", ".ogg"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}

/// Report file configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_path")]
    pub path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
        }
    }
}

fn default_report_path() -> PathBuf {
    PathBuf::from("audio_metadata_report.txt")
}
