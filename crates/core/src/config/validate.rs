use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - At least one audio extension is configured
/// - Report, ffmpeg, ffprobe and output paths are not empty
/// - A configured conversion timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.library.extensions.is_empty() {
        return Err(ConfigError::ValidationError(
            "library.extensions cannot be empty".to_string(),
        ));
    }

    let paths = [
        ("library.root_dir", &config.library.root_dir),
        ("report.path", &config.report.path),
        ("converter.ffmpeg_path", &config.converter.ffmpeg_path),
        ("converter.ffprobe_path", &config.converter.ffprobe_path),
        ("converter.output_dir", &config.converter.output_dir),
    ];
    for (name, path) in paths {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                name
            )));
        }
    }

    if config.converter.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "converter.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
