use super::defaults;
use super::models::{ConverterConfig, LogLevel};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    paths: PathsConfig,
    #[serde(default)]
    page: PageConfig,
    #[serde(default)]
    body: BodyConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    normalization: NormalizationConfig,
}

impl From<ConfigTables> for ConverterConfig {
    fn from(tables: ConfigTables) -> Self {
        ConverterConfig {
            source_dir: tables.paths.source_dir,
            output_dir: tables.paths.output_dir,
            source_extension: tables.paths.source_extension,
            output_extension: tables.paths.output_extension,
            page_width: tables.page.width,
            page_height: tables.page.height,
            margin_left: tables.page.margin_left,
            margin_right: tables.page.margin_right,
            margin_top: tables.page.margin_top,
            margin_bottom: tables.page.margin_bottom,
            body_font_size: tables.body.font_size,
            body_leading: tables.body.leading,
            log_level: tables.logging.log_level,
            replacements: {
                let mut replacements = defaults::default_replacements();
                replacements.extend(tables.normalization.replacements);
                replacements
            },
        }
    }
}

impl From<&ConverterConfig> for ConfigTables {
    fn from(config: &ConverterConfig) -> Self {
        ConfigTables {
            paths: PathsConfig {
                source_dir: config.source_dir.clone(),
                output_dir: config.output_dir.clone(),
                source_extension: config.source_extension.clone(),
                output_extension: config.output_extension.clone(),
            },
            page: PageConfig {
                width: config.page_width,
                height: config.page_height,
                margin_left: config.margin_left,
                margin_right: config.margin_right,
                margin_top: config.margin_top,
                margin_bottom: config.margin_bottom,
            },
            body: BodyConfig {
                font_size: config.body_font_size,
                leading: config.body_leading,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            normalization: NormalizationConfig {
                replacements: config.replacements.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PathsConfig {
    #[serde(default = "defaults::default_source_dir")]
    source_dir: PathBuf,
    #[serde(default = "defaults::default_output_dir")]
    output_dir: PathBuf,
    #[serde(default = "defaults::default_source_extension")]
    source_extension: String,
    #[serde(default = "defaults::default_output_extension")]
    output_extension: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            source_dir: defaults::default_source_dir(),
            output_dir: defaults::default_output_dir(),
            source_extension: defaults::default_source_extension(),
            output_extension: defaults::default_output_extension(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PageConfig {
    #[serde(default = "defaults::default_page_width")]
    width: f32,
    #[serde(default = "defaults::default_page_height")]
    height: f32,
    #[serde(default = "defaults::default_margin_horizontal")]
    margin_left: f32,
    #[serde(default = "defaults::default_margin_horizontal")]
    margin_right: f32,
    #[serde(default = "defaults::default_margin_top")]
    margin_top: f32,
    #[serde(default = "defaults::default_margin_bottom")]
    margin_bottom: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            width: defaults::default_page_width(),
            height: defaults::default_page_height(),
            margin_left: defaults::default_margin_horizontal(),
            margin_right: defaults::default_margin_horizontal(),
            margin_top: defaults::default_margin_top(),
            margin_bottom: defaults::default_margin_bottom(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct BodyConfig {
    #[serde(default = "defaults::default_body_font_size")]
    font_size: f32,
    #[serde(default = "defaults::default_body_leading")]
    leading: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        BodyConfig {
            font_size: defaults::default_body_font_size(),
            leading: defaults::default_body_leading(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

/// Extra replacements layered over the built-in typographic table.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct NormalizationConfig {
    #[serde(default)]
    replacements: BTreeMap<String, String>,
}
