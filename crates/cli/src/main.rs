use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cdjcheck_core::{
    load_config, load_default_config, validate_config, write_report, BatchConverter, Config,
    ConvertOptions, FfmpegConverter, LibraryScanner,
};

/// Config file read when `--config` is not given
const DEFAULT_CONFIG_PATH: &str = "cdjcheck.toml";

#[derive(Parser)]
#[command(name = "cdjcheck")]
#[command(about = "Check an audio library for CDJ compatibility and convert what fails", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "CDJCHECK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory and write the compatibility report
    Scan {
        /// Directory to scan recursively
        #[arg(long)]
        root_dir: Option<PathBuf>,
        /// Where to write the report
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Convert the files the report flags as incompatible
    Convert {
        /// Directory the report's file names are relative to
        #[arg(long)]
        root_dir: Option<PathBuf>,
        /// Report produced by `scan`
        #[arg(long)]
        report: Option<PathBuf>,
        /// Where converted files are written
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Print the ffmpeg commands without running them
        #[arg(long)]
        dry_run: bool,
    },
}

impl Commands {
    /// Applies command-line path overrides on top of the loaded config.
    fn apply_overrides(&self, config: &mut Config) {
        let (root_dir, report) = match self {
            Commands::Scan { root_dir, report } => (root_dir, report),
            Commands::Convert {
                root_dir,
                report,
                output_dir,
                ..
            } => {
                if let Some(output_dir) = output_dir {
                    config.converter.output_dir = output_dir.clone();
                }
                (root_dir, report)
            }
        };
        if let Some(root_dir) = root_dir {
            config.library.root_dir = root_dir.clone();
        }
        if let Some(report) = report {
            config.report.path = report.clone();
        }
    }
}

/// Loads the explicit config file, or the default one when it exists.
fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
            load_config(Path::new(DEFAULT_CONFIG_PATH))
                .with_context(|| format!("Failed to load config from {}", DEFAULT_CONFIG_PATH))
        }
        None => load_default_config().context("Failed to load default configuration"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = resolve_config(cli.config.as_deref())?;
    cli.command.apply_overrides(&mut config);
    validate_config(&config).context("Configuration validation failed")?;

    let converter = FfmpegConverter::new(config.converter.clone());

    match cli.command {
        Commands::Scan { .. } => {
            let scanner = LibraryScanner::new(converter, &config.library)
                .with_excluded_dir(&config.converter.output_dir);
            let report = scanner
                .scan(&config.library.root_dir)
                .await
                .context("Scan failed")?;
            write_report(&report, &config.report.path).await?;
        }
        Commands::Convert { dry_run, .. } => {
            let options = ConvertOptions {
                dry_run,
                ..ConvertOptions::from_config(&config)
            };
            let summary = BatchConverter::new(converter)
                .run(&options)
                .await
                .context("Conversion failed")?;
            info!(
                "Conversion process completed: {} of {} incompatible files converted",
                summary.converted.len(),
                summary.incompatible
            );
        }
    }

    Ok(())
}
