use super::models::ConverterConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> ConverterConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return ConverterConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            ConverterConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<ConverterConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("Failed to parse config TOML")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &ConverterConfig) -> Result<String> {
    toml::to_string(&ConfigTables::from(config)).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::LogLevel;
    use std::path::PathBuf;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = parse_config("").expect("empty TOML is valid");
        assert_eq!(cfg, ConverterConfig::default());
        assert_eq!(cfg.margin_bottom, 18.0);
        assert_eq!(cfg.replacements.len(), 6);
    }

    #[test]
    fn tables_override_individual_fields() {
        let cfg = parse_config(
            r#"
            [paths]
            source_dir = "/srv/books"
            output_extension = "PDF"

            [page]
            margin_top = 36.0

            [logging]
            log_level = "debug"
            "#,
        )
        .expect("valid config");

        assert_eq!(cfg.source_dir, PathBuf::from("/srv/books"));
        assert_eq!(cfg.output_dir, PathBuf::from("books/pdf"));
        assert_eq!(cfg.output_extension, "PDF");
        assert_eq!(cfg.margin_top, 36.0);
        assert_eq!(cfg.margin_left, 72.0);
        assert_eq!(cfg.log_level, LogLevel::Debug);
    }

    #[test]
    fn user_replacements_extend_the_typographic_table() {
        let cfg = parse_config(
            r#"
            [normalization.replacements]
            "…" = "..."
            "#,
        )
        .expect("valid config");

        assert_eq!(cfg.replacements.get("…").map(String::as_str), Some("..."));
        assert_eq!(
            cfg.replacements.get("\u{2014}").map(String::as_str),
            Some("-")
        );
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut cfg = ConverterConfig::default();
        cfg.output_dir = PathBuf::from("out");
        cfg.body_font_size = 12.0;
        let text = serialize_config(&cfg).expect("serializable");
        assert_eq!(parse_config(&text).expect("parsable"), cfg);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_config(Path::new("/definitely/not/here/config.toml"));
        assert_eq!(cfg, ConverterConfig::default());
    }

    #[test]
    fn output_path_replaces_extension() {
        let cfg = ConverterConfig::default();
        assert_eq!(
            cfg.output_path_for(Path::new("books/Moby Dick.epub")),
            PathBuf::from("books/pdf/Moby Dick.pdf")
        );
    }
}
