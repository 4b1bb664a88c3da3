//! Entry point for the EPUB to PDF converter.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml` (or `EPUB2PDF_CONFIG`).
//! - Hand the configuration to the batch driver.

mod batch;
mod config;
mod convert;
mod epub_loader;
mod extractor;
mod normalizer;
mod pagination;
mod pdf;
mod story;

use crate::batch::run_batch;
use crate::config::{ConverterConfig, load_config, serialize_config};
use anyhow::{Result, anyhow};
use std::env;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const CONFIG_ENV: &str = "EPUB2PDF_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args()?;
    let config_path = env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = load_config(&config_path);
    args.apply(&mut config);

    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        source = %config.source_dir.display(),
        output = %config.output_dir.display(),
        level = %config.log_level,
        "Starting EPUB to PDF conversion"
    );
    match serialize_config(&config) {
        Ok(effective) => debug!("Effective configuration:\n{effective}"),
        Err(err) => warn!("Could not render effective configuration: {err:#}"),
    }

    let summary = run_batch(&config)?;
    info!(
        found = summary.found,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Done"
    );
    Ok(())
}

/// Positional overrides: `epub2pdf [SOURCE_DIR [OUTPUT_DIR]]`.
#[derive(Debug, Default)]
struct CliArgs {
    source_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl CliArgs {
    fn apply(self, config: &mut ConverterConfig) {
        if let Some(dir) = self.source_dir {
            config.source_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
    }
}

fn parse_args() -> Result<CliArgs> {
    let mut args = env::args().skip(1);
    let parsed = CliArgs {
        source_dir: args.next().map(PathBuf::from),
        output_dir: args.next().map(PathBuf::from),
    };
    if args.next().is_some() {
        return Err(anyhow!("Usage: epub2pdf [SOURCE_DIR [OUTPUT_DIR]]"));
    }
    Ok(parsed)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr)
                .with_filter(filter_layer),
        )
        .init();
    debug!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        debug!(%level, "Applied log level from config");
    }
}
