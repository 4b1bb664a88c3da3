use std::collections::BTreeMap;
use std::path::PathBuf;

pub(crate) fn default_source_dir() -> PathBuf {
    PathBuf::from("books")
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from("books/pdf")
}

pub(crate) fn default_source_extension() -> String {
    "epub".to_string()
}

pub(crate) fn default_output_extension() -> String {
    "pdf".to_string()
}

/// US Letter, in points.
pub(crate) fn default_page_width() -> f32 {
    612.0
}

pub(crate) fn default_page_height() -> f32 {
    792.0
}

pub(crate) fn default_margin_horizontal() -> f32 {
    72.0
}

pub(crate) fn default_margin_top() -> f32 {
    72.0
}

pub(crate) fn default_margin_bottom() -> f32 {
    18.0
}

pub(crate) fn default_body_font_size() -> f32 {
    11.0
}

pub(crate) fn default_body_leading() -> f32 {
    14.0
}

pub(crate) fn default_log_level() -> super::models::LogLevel {
    super::models::LogLevel::Info
}

pub(crate) fn default_replacements() -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert("\u{2018}".to_string(), "'".to_string());
    map.insert("\u{2019}".to_string(), "'".to_string());
    map.insert("\u{201C}".to_string(), "\"".to_string());
    map.insert("\u{201D}".to_string(), "\"".to_string());
    map.insert("\u{2013}".to_string(), "-".to_string());
    map.insert("\u{2014}".to_string(), "-".to_string());
    map
}
