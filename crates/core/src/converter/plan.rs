//! Conversion-parameter planning.

use std::path::Path;

use crate::compat::{AudioProperties, CompatibilityRule, FormatKey};

/// Target format plus the ffmpeg parameters needed to reach compatibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPlan {
    /// Output format.
    pub target: FormatKey,
    /// Parameter tokens inserted between `-y` and the output path.
    pub params: Vec<String>,
}

impl ConversionPlan {
    /// Output file name: the input's stem with the target extension.
    pub fn output_file_name(&self, input_path: &Path) -> String {
        let stem = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        format!("{}.{}", stem, self.target.extension())
    }

    fn push(&mut self, tokens: &[&str]) {
        self.params.extend(tokens.iter().map(|t| t.to_string()));
    }

    fn push_bitrate(&mut self, key: FormatKey) {
        if let Some(bitrate) = target_bitrate(key) {
            self.push(&["-acodec", encoder(key), "-b:a", bitrate]);
        }
    }
}

/// Bitrate (kbps) lossy files are re-encoded at when out of range.
fn target_bitrate(key: FormatKey) -> Option<&'static str> {
    match key {
        FormatKey::Mp3 => Some("320k"),
        FormatKey::M4a => Some("256k"),
        _ => None,
    }
}

/// Encoder used when a file has to be re-encoded in its own format.
fn encoder(key: FormatKey) -> &'static str {
    match key {
        FormatKey::Wav => "pcm_s24le",
        FormatKey::Aiff => "pcm_s24be",
        FormatKey::Flac => "flac",
        FormatKey::Mp3 => "libmp3lame",
        FormatKey::M4a => "aac",
    }
}

/// Derives the target format and ffmpeg parameters for an incompatible file.
///
/// Known formats keep their container. Lossless files get 24-bit output when
/// their bit depth is out of range; lossy files are re-encoded at a fixed
/// bitrate when their bitrate is out of range. M4A files are also pinned to
/// that bitrate whenever they are resampled or remixed. Unknown formats fall back to
/// 24-bit WAV. Sample rate and channel corrections are appended independently.
pub fn plan_conversion(properties: &AudioProperties) -> ConversionPlan {
    let source = FormatKey::from_file_type(&properties.file_type);
    let target = source.unwrap_or(FormatKey::Wav);
    let rule = CompatibilityRule::for_format(target);

    let mut plan = ConversionPlan {
        target,
        params: Vec::new(),
    };

    let fix_rate = !rule.accepts_sample_rate(properties.sample_rate);
    let fix_channels = !rule.accepts_channels(properties.channels);

    match source {
        Some(key @ (FormatKey::Wav | FormatKey::Aiff)) => {
            if !rule.accepts_bit_depth(properties.bit_depth) {
                plan.push(&["-acodec", encoder(key)]);
            }
        }
        Some(FormatKey::Flac) => {
            if !rule.accepts_bit_depth(properties.bit_depth) {
                plan.push(&[
                    "-acodec",
                    encoder(FormatKey::Flac),
                    "-sample_fmt",
                    "s32",
                    "-bits_per_raw_sample",
                    "24",
                ]);
            }
        }
        Some(FormatKey::Mp3) => {
            if !rule.accepts_bitrate(properties.bitrate_kbps) {
                plan.push_bitrate(FormatKey::Mp3);
            }
        }
        // Any re-encode falls back to the AAC encoder's 128k default, below the minimum.
        Some(FormatKey::M4a) => {
            if !rule.accepts_bitrate(properties.bitrate_kbps) || fix_rate || fix_channels {
                plan.push_bitrate(FormatKey::M4a);
            }
        }
        None => plan.push(&["-acodec", encoder(FormatKey::Wav)]),
    }

    if fix_rate {
        if let Some(rate) = rule.primary_sample_rate() {
            plan.push(&["-ar", rate.to_string().as_str()]);
        }
    }

    if fix_channels {
        if let Some(channels) = rule.primary_channels() {
            plan.push(&["-ac", channels.to_string().as_str()]);
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::evaluate;

    fn props(
        file_type: &str,
        sample_rate: Option<u32>,
        bit_depth: Option<u32>,
        channels: Option<u32>,
        bitrate_kbps: Option<f64>,
    ) -> AudioProperties {
        AudioProperties {
            file_type: file_type.to_string(),
            sample_rate,
            bit_depth,
            channels,
            bitrate_kbps,
        }
    }

    /// Bitrate ffmpeg's encoder picks when a lossy file is re-encoded without `-b:a`.
    fn encoder_default_kbps(key: FormatKey) -> Option<f64> {
        match key {
            FormatKey::Mp3 | FormatKey::M4a => Some(128.0),
            _ => None,
        }
    }

    /// Predicts the properties of the transcoded file from the plan.
    fn apply(plan: &ConversionPlan, before: &AudioProperties) -> AudioProperties {
        let mut after = before.clone();
        after.file_type = format!(".{}", plan.target.extension());
        if !plan.params.is_empty() && !plan.params.iter().any(|p| p == "-b:a") {
            after.bitrate_kbps = encoder_default_kbps(plan.target);
        }
        let mut tokens = plan.params.iter();
        while let Some(flag) = tokens.next() {
            let value = tokens.next().map(String::as_str).unwrap_or_default();
            match flag.as_str() {
                "-acodec" if value.starts_with("pcm_s24") => after.bit_depth = Some(24),
                "-bits_per_raw_sample" => after.bit_depth = value.parse().ok(),
                "-ar" => after.sample_rate = value.parse().ok(),
                "-ac" => after.channels = value.parse().ok(),
                "-b:a" => {
                    after.bitrate_kbps = value.trim_end_matches('k').parse().ok();
                }
                _ => {}
            }
        }
        if plan.target.is_lossless() {
            after.bitrate_kbps = None;
        }
        after
    }

    #[test]
    fn test_mono_low_rate_mp3_keeps_format() {
        let plan = plan_conversion(&props(".mp3", Some(22050), None, Some(1), Some(128.0)));
        assert_eq!(plan.target, FormatKey::Mp3);
        assert_eq!(plan.params, vec!["-ar", "44100", "-ac", "2"]);
    }

    #[test]
    fn test_low_bitrate_mp3_is_reencoded() {
        let plan = plan_conversion(&props(".mp3", Some(44100), None, Some(2), Some(24.0)));
        assert_eq!(plan.params, vec!["-acodec", "libmp3lame", "-b:a", "320k"]);
    }

    #[test]
    fn test_high_bitrate_mp3_is_capped() {
        let plan = plan_conversion(&props(".mp3", Some(44100), None, Some(2), Some(448.0)));
        assert_eq!(plan.params, vec!["-acodec", "libmp3lame", "-b:a", "320k"]);
    }

    #[test]
    fn test_low_bitrate_m4a() {
        let plan = plan_conversion(&props(".m4a", Some(96000), None, Some(2), Some(128.0)));
        assert_eq!(plan.target, FormatKey::M4a);
        assert_eq!(
            plan.params,
            vec!["-acodec", "aac", "-b:a", "256k", "-ar", "44100"]
        );
    }

    #[test]
    fn test_remixed_m4a_keeps_minimum_bitrate() {
        let plan = plan_conversion(&props(".m4a", Some(44100), None, Some(1), Some(256.0)));
        assert_eq!(plan.target, FormatKey::M4a);
        assert_eq!(plan.params, vec!["-acodec", "aac", "-b:a", "256k", "-ac", "2"]);

        let plan = plan_conversion(&props(".m4a", Some(22050), None, Some(2), Some(320.0)));
        assert_eq!(
            plan.params,
            vec!["-acodec", "aac", "-b:a", "256k", "-ar", "44100"]
        );
    }

    #[test]
    fn test_m4a_bitrate_pinned_once() {
        let plan = plan_conversion(&props(".m4a", Some(22050), None, Some(1), Some(96.0)));
        assert_eq!(plan.params.iter().filter(|p| *p == "-b:a").count(), 1);
        assert_eq!(
            plan.params,
            vec!["-acodec", "aac", "-b:a", "256k", "-ar", "44100", "-ac", "2"]
        );
    }

    #[test]
    fn test_wav_bit_depth_normalized_to_24() {
        let plan = plan_conversion(&props(".wav", Some(44100), Some(32), Some(2), None));
        assert_eq!(plan.target, FormatKey::Wav);
        assert_eq!(plan.params, vec!["-acodec", "pcm_s24le"]);
    }

    #[test]
    fn test_aif_alias_targets_aiff() {
        let plan = plan_conversion(&props(".aif", Some(44100), Some(8), Some(2), None));
        assert_eq!(plan.target, FormatKey::Aiff);
        assert_eq!(plan.params, vec!["-acodec", "pcm_s24be"]);
        assert_eq!(plan.output_file_name(Path::new("/m/loop.aif")), "loop.aiff");
    }

    #[test]
    fn test_flac_high_resolution() {
        let plan = plan_conversion(&props(".flac", Some(96000), Some(32), Some(2), None));
        assert_eq!(plan.target, FormatKey::Flac);
        assert_eq!(
            plan.params,
            vec![
                "-acodec",
                "flac",
                "-sample_fmt",
                "s32",
                "-bits_per_raw_sample",
                "24",
                "-ar",
                "44100"
            ]
        );
    }

    #[test]
    fn test_unknown_format_falls_back_to_wav() {
        let plan = plan_conversion(&props(".ogg", Some(48000), None, Some(2), Some(160.0)));
        assert_eq!(plan.target, FormatKey::Wav);
        assert_eq!(plan.params, vec!["-acodec", "pcm_s24le"]);

        let plan = plan_conversion(&props(".ogg", Some(22050), None, Some(1), Some(64.0)));
        assert_eq!(
            plan.params,
            vec!["-acodec", "pcm_s24le", "-ar", "44100", "-ac", "2"]
        );
    }

    #[test]
    fn test_unknown_values_are_normalized() {
        let plan = plan_conversion(&props(".wav", None, None, None, None));
        assert_eq!(
            plan.params,
            vec!["-acodec", "pcm_s24le", "-ar", "44100", "-ac", "2"]
        );
    }

    #[test]
    fn test_plans_resolve_every_flagged_issue() {
        let cases = [
            props(".mp3", Some(22050), None, Some(1), Some(128.0)),
            props(".mp3", Some(48000), None, Some(6), Some(16.0)),
            props(".mp3", Some(44100), None, Some(2), Some(500.0)),
            props(".m4a", Some(32000), None, None, Some(96.0)),
            props(".m4a", Some(44100), None, Some(1), Some(256.0)),
            props(".m4a", Some(22050), None, Some(2), Some(320.0)),
            props(".wav", Some(96000), Some(32), Some(1), None),
            props(".wave", None, Some(8), Some(2), None),
            props(".aif", Some(88200), Some(32), Some(2), None),
            props(".aiff", Some(44100), None, Some(4), None),
            props(".flac", Some(192000), Some(32), Some(2), None),
            props(".ogg", Some(44100), None, Some(2), Some(192.0)),
            props(".opus", None, None, None, None),
        ];
        for case in &cases {
            assert!(!evaluate(case).is_compatible(), "{:?}", case);
            let plan = plan_conversion(case);
            let predicted = apply(&plan, case);
            let result = evaluate(&predicted);
            assert!(
                result.is_compatible(),
                "{:?} -> {:?}: {:?}",
                case,
                plan,
                result.messages()
            );
        }
    }
}
