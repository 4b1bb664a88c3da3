//! Directory-level batch conversion.
//!
//! Every matching file in the source folder is converted independently; a
//! failure is reported and counted, and the run moves on to the next file.

use crate::config::ConverterConfig;
use crate::convert::Converter;
use crate::epub_loader::{EpubPackage, PackageSource};
use crate::normalizer::TextNormalizer;
use crate::pdf::PdfRenderer;
use crate::story::PageRenderer;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const BANNER_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub found: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Convert every EPUB in the configured source folder to PDF.
pub fn run_batch(config: &ConverterConfig) -> Result<BatchSummary> {
    let converter = Converter::new(
        TextNormalizer::new(&config.replacements),
        PdfRenderer::from_config(config),
    );
    run_with(config, &converter, EpubPackage::open)
}

/// Non-recursive listing of files whose extension matches the configured
/// source extension, ignoring case, sorted by path.
pub fn discover_sources(config: &ConverterConfig) -> Result<Vec<PathBuf>> {
    let dir = &config.source_dir;
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read source folder {}", dir.display()))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to list source folder {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&config.source_extension));
        if matches {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

fn run_with<R, P, F>(
    config: &ConverterConfig,
    converter: &Converter<R>,
    mut open: F,
) -> Result<BatchSummary>
where
    R: PageRenderer,
    P: PackageSource,
    F: FnMut(&Path) -> Result<P>,
{
    println!("EPUB to PDF Converter");
    println!("{}", "=".repeat(BANNER_WIDTH));

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output folder {}",
            config.output_dir.display()
        )
    })?;

    let sources = discover_sources(config)?;
    let mut summary = BatchSummary {
        found: sources.len(),
        ..BatchSummary::default()
    };

    if sources.is_empty() {
        info!(dir = %config.source_dir.display(), "No source files found");
        println!("No EPUB files found in the source folder!");
        return Ok(summary);
    }

    info!(
        dir = %config.source_dir.display(),
        files = sources.len(),
        "Starting batch conversion"
    );
    println!("Found {} EPUB file(s) to convert...", sources.len());
    println!();

    for source in &sources {
        let name = display_name(source);
        let out = config.output_path_for(source);
        println!("Converting: {name} ...");

        let result = open(source).and_then(|package| converter.convert(package, &out));
        match result {
            Ok(_) => {
                summary.succeeded += 1;
                println!("✓ Successfully converted: {name}");
            }
            Err(err) => {
                summary.failed += 1;
                warn!(path = %source.display(), "Conversion failed: {err:#}");
                println!("✗ Error converting {name}: {err:#}");
            }
        }
    }

    println!();
    println!("{}", "=".repeat(BANNER_WIDTH));
    println!("Conversion Complete!");
    println!("Successful: {}", summary.succeeded);
    println!("Failed: {}", summary.failed);
    println!("Output folder: {}", config.output_dir.display());
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Batch conversion finished"
    );

    Ok(summary)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
