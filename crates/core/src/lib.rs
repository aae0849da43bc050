pub mod compat;
pub mod config;
pub mod converter;
pub mod pipeline;
pub mod report;
pub mod testing;

pub use compat::{evaluate, AudioProperties, Compatibility, CompatibilityRule, FormatKey, Issue};
pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config, ConfigError,
    LibraryConfig, ReportConfig,
};
pub use converter::{
    plan_conversion, ConversionJob, ConversionPlan, ConversionResult, Converter, ConverterConfig,
    ConverterError, FfmpegConverter, MediaInfo,
};
pub use pipeline::{
    write_report, BatchConverter, ConvertOptions, ConvertSummary, LibraryScanner, PipelineError,
};
pub use report::{parse_report, render_report, AudioFileRecord, ReportEntry, ScanReport};
