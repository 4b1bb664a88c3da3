use super::fonts::Font;
use std::collections::BTreeMap;

pub const TITLE_STYLE: &str = "Title";
pub const BYLINE_STYLE: &str = "Byline";
pub const BODY_STYLE: &str = "Justify";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    /// Full justification; the last line of a paragraph stays left-aligned.
    Justify,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub font: Font,
    pub font_size: f32,
    pub leading: f32,
    pub alignment: Alignment,
    pub space_after: f32,
}

/// Named paragraph styles, seeded with the three the converter uses.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    styles: BTreeMap<String, ParagraphStyle>,
}

impl StyleSheet {
    pub fn new(body_font_size: f32, body_leading: f32) -> Self {
        let mut sheet = Self {
            styles: BTreeMap::new(),
        };
        sheet.add(
            TITLE_STYLE,
            ParagraphStyle {
                font: Font::HelveticaBold,
                font_size: 18.0,
                leading: 22.0,
                alignment: Alignment::Center,
                space_after: 6.0,
            },
        );
        sheet.add(
            BYLINE_STYLE,
            ParagraphStyle {
                font: Font::HelveticaOblique,
                font_size: 10.0,
                leading: 12.0,
                alignment: Alignment::Left,
                space_after: 0.0,
            },
        );
        sheet.add(
            BODY_STYLE,
            ParagraphStyle {
                font: Font::Helvetica,
                font_size: body_font_size,
                leading: body_leading,
                alignment: Alignment::Justify,
                space_after: 0.0,
            },
        );
        sheet
    }

    pub fn add(&mut self, name: &str, style: ParagraphStyle) {
        self.styles.insert(name.to_string(), style);
    }

    pub fn get(&self, name: &str) -> Option<&ParagraphStyle> {
        self.styles.get(name)
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new(11.0, 14.0)
    }
}
