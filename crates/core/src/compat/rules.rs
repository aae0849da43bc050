//! The CDJ compatibility rule table.

use super::types::FormatKey;

/// Accepted bitrate range in kbps. Either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitrateRange {
    /// Lowest accepted bitrate, inclusive.
    pub min_kbps: Option<u32>,
    /// Highest accepted bitrate, inclusive.
    pub max_kbps: Option<u32>,
}

impl BitrateRange {
    /// Whether `kbps` is below the lower bound.
    pub fn is_below(&self, kbps: f64) -> bool {
        self.min_kbps.is_some_and(|min| kbps < f64::from(min))
    }

    /// Whether `kbps` is above the upper bound.
    pub fn is_above(&self, kbps: f64) -> bool {
        self.max_kbps.is_some_and(|max| kbps > f64::from(max))
    }

    /// Whether `kbps` lies within both bounds.
    pub fn contains(&self, kbps: f64) -> bool {
        !self.is_below(kbps) && !self.is_above(kbps)
    }
}

/// Constraints a file of one format must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityRule {
    /// Accepted sample rates in Hz. The first entry is the normalization target.
    pub sample_rates: &'static [u32],
    /// Accepted bit depths, or `None` when the format has no bit depth.
    pub bit_depths: Option<&'static [u32]>,
    /// Accepted channel counts. The first entry is the normalization target.
    pub channels: &'static [u32],
    /// Accepted bitrate range, or `None` for lossless formats.
    pub bitrate: Option<BitrateRange>,
}

static WAV_RULE: CompatibilityRule = CompatibilityRule {
    sample_rates: &[44100, 48000],
    bit_depths: Some(&[16, 24]),
    channels: &[2],
    bitrate: None,
};

static MP3_RULE: CompatibilityRule = CompatibilityRule {
    sample_rates: &[44100],
    bit_depths: None,
    channels: &[2],
    bitrate: Some(BitrateRange {
        min_kbps: Some(32),
        max_kbps: Some(320),
    }),
};

static AIFF_RULE: CompatibilityRule = CompatibilityRule {
    sample_rates: &[44100, 48000],
    bit_depths: Some(&[16, 24]),
    channels: &[2],
    bitrate: None,
};

static FLAC_RULE: CompatibilityRule = CompatibilityRule {
    sample_rates: &[44100, 48000],
    bit_depths: Some(&[16, 24]),
    channels: &[2],
    bitrate: None,
};

static M4A_RULE: CompatibilityRule = CompatibilityRule {
    sample_rates: &[44100, 48000],
    bit_depths: None,
    channels: &[2],
    bitrate: Some(BitrateRange {
        min_kbps: Some(256),
        max_kbps: None,
    }),
};

impl CompatibilityRule {
    /// Returns the rule for a supported format.
    pub fn for_format(key: FormatKey) -> &'static CompatibilityRule {
        match key {
            FormatKey::Wav => &WAV_RULE,
            FormatKey::Mp3 => &MP3_RULE,
            FormatKey::Aiff => &AIFF_RULE,
            FormatKey::Flac => &FLAC_RULE,
            FormatKey::M4a => &M4A_RULE,
        }
    }

    /// Whether the sample rate is known and allowed.
    pub fn accepts_sample_rate(&self, sample_rate: Option<u32>) -> bool {
        accepts(self.sample_rates, sample_rate)
    }

    /// Whether the bit depth is allowed. Always true when bit depth is unconstrained.
    pub fn accepts_bit_depth(&self, bit_depth: Option<u32>) -> bool {
        self.bit_depths.map_or(true, |allowed| accepts(allowed, bit_depth))
    }

    /// Whether the channel count is known and allowed.
    pub fn accepts_channels(&self, channels: Option<u32>) -> bool {
        accepts(self.channels, channels)
    }

    /// Whether the bitrate is within range. Unknown bitrates are not compared.
    pub fn accepts_bitrate(&self, bitrate_kbps: Option<f64>) -> bool {
        match (self.bitrate, bitrate_kbps) {
            (Some(range), Some(kbps)) => range.contains(kbps),
            _ => true,
        }
    }

    /// The sample rate files are normalized to.
    pub fn primary_sample_rate(&self) -> Option<u32> {
        self.sample_rates.first().copied()
    }

    /// The channel count files are normalized to.
    pub fn primary_channels(&self) -> Option<u32> {
        self.channels.first().copied()
    }
}

fn accepts(allowed: &[u32], value: Option<u32>) -> bool {
    value.is_some_and(|v| allowed.contains(&v))
}
