use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Everything a conversion run needs; deserializable from TOML tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub source_extension: String,
    pub output_extension: String,
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub body_font_size: f32,
    pub body_leading: f32,
    pub log_level: LogLevel,
    pub replacements: BTreeMap<String, String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            source_dir: crate::config::defaults::default_source_dir(),
            output_dir: crate::config::defaults::default_output_dir(),
            source_extension: crate::config::defaults::default_source_extension(),
            output_extension: crate::config::defaults::default_output_extension(),
            page_width: crate::config::defaults::default_page_width(),
            page_height: crate::config::defaults::default_page_height(),
            margin_left: crate::config::defaults::default_margin_horizontal(),
            margin_right: crate::config::defaults::default_margin_horizontal(),
            margin_top: crate::config::defaults::default_margin_top(),
            margin_bottom: crate::config::defaults::default_margin_bottom(),
            body_font_size: crate::config::defaults::default_body_font_size(),
            body_leading: crate::config::defaults::default_body_leading(),
            log_level: crate::config::defaults::default_log_level(),
            replacements: crate::config::defaults::default_replacements(),
        }
    }
}

impl ConverterConfig {
    /// Output path for one source file: same stem, output extension.
    pub fn output_path_for(&self, source: &std::path::Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_else(|| "output".into());
        let mut path = self.output_dir.join(stem);
        path.set_extension(&self.output_extension);
        path
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
