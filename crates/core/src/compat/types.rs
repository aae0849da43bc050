//! Types for the compatibility module.

use std::fmt;

/// Canonical keys of the compatibility rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKey {
    /// WAVE (uncompressed PCM)
    Wav,
    /// MPEG Audio Layer III
    Mp3,
    /// Audio Interchange File Format
    Aiff,
    /// Free Lossless Audio Codec
    Flac,
    /// AAC in an MPEG-4 container
    M4a,
}

impl FormatKey {
    /// Normalizes a file type token (`".AIF"`, `"wave"`, `"mp3"`) into a rule key.
    ///
    /// `aif` is an alias of `aiff` and `wave` an alias of `wav`. Returns `None`
    /// for anything outside the rule table.
    pub fn from_file_type(file_type: &str) -> Option<Self> {
        let token = file_type.trim().trim_start_matches('.').to_ascii_lowercase();
        match token.as_str() {
            "wav" | "wave" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "aiff" | "aif" => Some(Self::Aiff),
            "flac" => Some(Self::Flac),
            "m4a" => Some(Self::M4a),
            _ => None,
        }
    }

    /// Returns the file extension (without dot) used for output files.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Aiff => "aiff",
            Self::Flac => "flac",
            Self::M4a => "m4a",
        }
    }

    /// Whether this format is lossless.
    pub fn is_lossless(&self) -> bool {
        matches!(self, Self::Wav | Self::Aiff | Self::Flac)
    }
}

impl fmt::Display for FormatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Technical properties of an audio file that compatibility depends on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AudioProperties {
    /// Lower-cased extension with leading dot (e.g. `".mp3"`).
    pub file_type: String,
    /// Sample rate in Hz.
    pub sample_rate: Option<u32>,
    /// Bits per sample.
    pub bit_depth: Option<u32>,
    /// Number of channels.
    pub channels: Option<u32>,
    /// Bitrate in kbps (lossy formats only).
    pub bitrate_kbps: Option<f64>,
}

/// A single violated compatibility constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    /// The file type has no entry in the rule table.
    UnsupportedFormat { file_type: String },
    /// Sample rate is unknown or not in the allowed set.
    SampleRate {
        actual: Option<u32>,
        allowed: &'static [u32],
    },
    /// Bit depth is unknown or not in the allowed set.
    BitDepth {
        actual: Option<u32>,
        allowed: &'static [u32],
    },
    /// Channel count is unknown or not in the allowed set.
    Channels {
        actual: Option<u32>,
        allowed: &'static [u32],
    },
    /// Bitrate is below the format's minimum.
    BitrateTooLow { actual: f64, min: u32 },
    /// Bitrate is above the format's maximum.
    BitrateTooHigh { actual: f64, max: u32 },
}

fn known(value: Option<u32>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

fn joined(values: &[u32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { file_type } => {
                write!(f, "Format not supported: {}", file_type)
            }
            Self::SampleRate { actual, allowed } => write!(
                f,
                "Sample rate {} Hz not supported (allowed: {} Hz)",
                known(*actual),
                joined(allowed)
            ),
            Self::BitDepth { actual, allowed } => write!(
                f,
                "Bit depth {} bits not supported (allowed: {} bits)",
                known(*actual),
                joined(allowed)
            ),
            Self::Channels { actual, allowed } => write!(
                f,
                "Channel count {} not supported (allowed: {})",
                known(*actual),
                joined(allowed)
            ),
            Self::BitrateTooLow { actual, min } => {
                write!(f, "Bitrate {} kbps below minimum of {} kbps", actual, min)
            }
            Self::BitrateTooHigh { actual, max } => {
                write!(f, "Bitrate {} kbps above maximum of {} kbps", actual, max)
            }
        }
    }
}

/// Outcome of evaluating a file against the rule table.
///
/// The compatibility flag is derived from the issue list, so the two can
/// never disagree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compatibility {
    issues: Vec<Issue>,
}

impl Compatibility {
    /// Creates an evaluation result from the violated constraints.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Whether the file satisfies every constraint.
    pub fn is_compatible(&self) -> bool {
        self.issues.is_empty()
    }

    /// The violated constraints, in evaluation order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Human-readable issue descriptions, as written to the report.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_key_normalization() {
        assert_eq!(FormatKey::from_file_type(".wav"), Some(FormatKey::Wav));
        assert_eq!(FormatKey::from_file_type("WAVE"), Some(FormatKey::Wav));
        assert_eq!(FormatKey::from_file_type(".aif"), Some(FormatKey::Aiff));
        assert_eq!(FormatKey::from_file_type(".AIFF"), Some(FormatKey::Aiff));
        assert_eq!(FormatKey::from_file_type("m4a"), Some(FormatKey::M4a));
        assert_eq!(FormatKey::from_file_type(".ogg"), None);
        assert_eq!(FormatKey::from_file_type(""), None);
    }

    #[test]
    fn test_format_key_extension() {
        assert_eq!(FormatKey::Aiff.extension(), "aiff");
        assert_eq!(FormatKey::M4a.to_string(), "m4a");
        assert!(FormatKey::Flac.is_lossless());
        assert!(!FormatKey::Mp3.is_lossless());
    }

    #[test]
    fn test_issue_messages() {
        let issue = Issue::SampleRate {
            actual: Some(22050),
            allowed: &[44100, 48000],
        };
        assert_eq!(
            issue.to_string(),
            "Sample rate 22050 Hz not supported (allowed: 44100, 48000 Hz)"
        );

        let issue = Issue::BitDepth {
            actual: None,
            allowed: &[16, 24],
        };
        assert_eq!(
            issue.to_string(),
            "Bit depth unknown bits not supported (allowed: 16, 24 bits)"
        );

        let issue = Issue::BitrateTooLow {
            actual: 24.5,
            min: 32,
        };
        assert_eq!(issue.to_string(), "Bitrate 24.5 kbps below minimum of 32 kbps");
    }

    #[test]
    fn test_compatibility_flag_follows_issues() {
        assert!(Compatibility::default().is_compatible());
        let result = Compatibility::from_issues(vec![Issue::UnsupportedFormat {
            file_type: ".ogg".to_string(),
        }]);
        assert!(!result.is_compatible());
        assert_eq!(result.messages(), vec!["Format not supported: .ogg"]);
    }
}
