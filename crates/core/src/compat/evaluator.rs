//! Compatibility evaluation.

use super::rules::CompatibilityRule;
use super::types::{AudioProperties, Compatibility, FormatKey, Issue};

/// Evaluates a file against the rule for its format.
///
/// Unknown file types fail with a single [`Issue::UnsupportedFormat`].
pub fn evaluate(properties: &AudioProperties) -> Compatibility {
    match FormatKey::from_file_type(&properties.file_type) {
        Some(key) => evaluate_against(CompatibilityRule::for_format(key), properties),
        None => Compatibility::from_issues(vec![Issue::UnsupportedFormat {
            file_type: properties.file_type.clone(),
        }]),
    }
}

/// Evaluates a file against an explicit rule.
///
/// Issues are reported in a fixed order: sample rate, bit depth, channels,
/// bitrate-low, bitrate-high.
pub fn evaluate_against(rule: &CompatibilityRule, properties: &AudioProperties) -> Compatibility {
    let mut issues = Vec::new();

    if !rule.accepts_sample_rate(properties.sample_rate) {
        issues.push(Issue::SampleRate {
            actual: properties.sample_rate,
            allowed: rule.sample_rates,
        });
    }

    if let Some(allowed) = rule.bit_depths {
        if !rule.accepts_bit_depth(properties.bit_depth) {
            issues.push(Issue::BitDepth {
                actual: properties.bit_depth,
                allowed,
            });
        }
    }

    if !rule.accepts_channels(properties.channels) {
        issues.push(Issue::Channels {
            actual: properties.channels,
            allowed: rule.channels,
        });
    }

    if let (Some(range), Some(kbps)) = (rule.bitrate, properties.bitrate_kbps) {
        if let Some(min) = range.min_kbps.filter(|_| range.is_below(kbps)) {
            issues.push(Issue::BitrateTooLow { actual: kbps, min });
        }
        if let Some(max) = range.max_kbps.filter(|_| range.is_above(kbps)) {
            issues.push(Issue::BitrateTooHigh { actual: kbps, max });
        }
    }

    Compatibility::from_issues(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::BitrateRange;

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

    #[test]
    fn test_cd_quality_wav_is_compatible() {
        let result = evaluate(&props(".wav", Some(44100), Some(16), Some(2), None));
        assert!(result.is_compatible());
        assert!(result.issues().is_empty());
    }

    #[test]
    fn test_every_format_accepts_its_own_allowed_values() {
        let cases = [
            props(".wav", Some(48000), Some(24), Some(2), None),
            props(".aif", Some(44100), Some(24), Some(2), None),
            props(".aiff", Some(48000), Some(16), Some(2), None),
            props(".flac", Some(48000), Some(24), Some(2), None),
            props(".mp3", Some(44100), None, Some(2), Some(320.0)),
            props(".mp3", Some(44100), None, Some(2), Some(32.0)),
            props(".m4a", Some(48000), None, Some(2), Some(256.0)),
            props(".m4a", Some(44100), Some(16), Some(2), Some(512.0)),
        ];
        for case in &cases {
            let result = evaluate(case);
            assert!(result.is_compatible(), "{:?}: {:?}", case, result.messages());
        }
    }

    #[test]
    fn test_unknown_format_has_single_issue() {
        // Even with perfect properties the format itself fails.
        let result = evaluate(&props(".ogg", Some(44100), Some(16), Some(2), Some(320.0)));
        assert!(!result.is_compatible());
        assert_eq!(
            result.issues(),
            &[Issue::UnsupportedFormat {
                file_type: ".ogg".to_string()
            }]
        );

        let result = evaluate(&props(".wma", None, None, None, None));
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.messages(), vec!["Format not supported: .wma"]);
    }

    #[test]
    fn test_low_sample_rate_mono_mp3() {
        let result = evaluate(&props(".mp3", Some(22050), None, Some(1), Some(128.0)));
        assert!(!result.is_compatible());
        assert_eq!(
            result.issues(),
            &[
                Issue::SampleRate {
                    actual: Some(22050),
                    allowed: &[44100],
                },
                Issue::Channels {
                    actual: Some(1),
                    allowed: &[2],
                },
            ]
        );
    }

    #[test]
    fn test_unknown_sample_rate_is_a_violation() {
        let result = evaluate(&props(".wav", None, Some(16), Some(2), None));
        assert_eq!(
            result.messages(),
            vec!["Sample rate unknown Hz not supported (allowed: 44100, 48000 Hz)"]
        );
    }

    #[test]
    fn test_bit_depth_ignored_for_lossy_formats() {
        let result = evaluate(&props(".mp3", Some(44100), Some(32), Some(2), Some(192.0)));
        assert!(result.is_compatible());
    }

    #[test]
    fn test_bitrate_low_and_high() {
        let low = evaluate(&props(".mp3", Some(44100), None, Some(2), Some(24.0)));
        assert_eq!(
            low.issues(),
            &[Issue::BitrateTooLow {
                actual: 24.0,
                min: 32
            }]
        );

        let high = evaluate(&props(".mp3", Some(44100), None, Some(2), Some(448.0)));
        assert_eq!(
            high.issues(),
            &[Issue::BitrateTooHigh {
                actual: 448.0,
                max: 320
            }]
        );

        let low_aac = evaluate(&props(".m4a", Some(44100), None, Some(2), Some(128.0)));
        assert_eq!(
            low_aac.messages(),
            vec!["Bitrate 128 kbps below minimum of 256 kbps"]
        );
    }

    #[test]
    fn test_unknown_bitrate_is_not_compared() {
        let result = evaluate(&props(".m4a", Some(44100), None, Some(2), None));
        assert!(result.is_compatible());
    }

    #[test]
    fn test_issue_order() {
        let result = evaluate(&props(".flac", Some(96000), Some(32), Some(6), None));
        let messages = result.messages();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("Sample rate"));
        assert!(messages[1].starts_with("Bit depth"));
        assert!(messages[2].starts_with("Channel count"));
    }

    #[test]
    fn test_inverted_range_reports_both_bitrate_issues() {
        let rule = CompatibilityRule {
            sample_rates: &[44100],
            bit_depths: None,
            channels: &[2],
            bitrate: Some(BitrateRange {
                min_kbps: Some(320),
                max_kbps: Some(128),
            }),
        };
        let result = evaluate_against(&rule, &props(".mp3", Some(44100), None, Some(2), Some(200.0)));
        assert_eq!(
            result.issues(),
            &[
                Issue::BitrateTooLow {
                    actual: 200.0,
                    min: 320
                },
                Issue::BitrateTooHigh {
                    actual: 200.0,
                    max: 128
                },
            ]
        );
    }
}
