//! PDF backend for [`PageRenderer`].
//!
//! Text is drawn with the standard Helvetica faces in WinAnsi encoding, so
//! no fonts are embedded and every output is a plain single-column document.

pub mod fonts;
pub mod styles;
mod writer;

use crate::config::ConverterConfig;
use crate::pagination::{PageSetup, paginate};
use crate::story::{DocumentInfo, Flowable, LayoutError, PageRenderer};
use anyhow::{Context, Result};
use fonts::encode_text;
use std::path::Path;
use styles::StyleSheet;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    setup: PageSetup,
    styles: StyleSheet,
}

impl PdfRenderer {
    pub fn new(setup: PageSetup, styles: StyleSheet) -> Self {
        Self { setup, styles }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        let setup = PageSetup {
            width: config.page_width,
            height: config.page_height,
            margin_left: config.margin_left,
            margin_right: config.margin_right,
            margin_top: config.margin_top,
            margin_bottom: config.margin_bottom,
        };
        Self::new(
            setup,
            StyleSheet::new(config.body_font_size, config.body_leading),
        )
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(PageSetup::default(), StyleSheet::default())
    }
}

impl PageRenderer for PdfRenderer {
    fn paragraph(&self, text: &str, style: &str) -> Result<Flowable, LayoutError> {
        if self.styles.get(style).is_none() {
            return Err(LayoutError::UnknownStyle(style.to_string()));
        }
        let encoded = encode_text(text);
        if encoded.drawable == 0 {
            return Err(LayoutError::NothingToDraw);
        }
        if encoded.substituted > 0 {
            debug!(
                substituted = encoded.substituted,
                "Paragraph has characters outside the font encoding"
            );
        }
        Ok(Flowable::Paragraph {
            text: text.to_string(),
            style: style.to_string(),
        })
    }

    fn render(&self, story: &[Flowable], info: &DocumentInfo, out: &Path) -> Result<()> {
        let pages = paginate(story, &self.styles, &self.setup)
            .with_context(|| format!("Failed to lay out {}", out.display()))?;
        let mut doc = writer::build_document(&pages, &self.setup, info)?;
        writer::save_document(&mut doc, out)?;
        info!(
            path = %out.display(),
            pages = pages.len(),
            flowables = story.len(),
            "Wrote PDF"
        );
        Ok(())
    }
}
