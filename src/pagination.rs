//! Pagination utilities.
//!
//! Paragraphs are broken into lines greedily using the font's glyph widths,
//! then stacked top to bottom inside the page frame. A line that would cross
//! the bottom margin starts a new page; paragraphs may split across pages.

use crate::pdf::fonts::{Font, encode_text};
use crate::pdf::styles::{Alignment, ParagraphStyle, StyleSheet};
use crate::story::{Flowable, LayoutError};

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl PageSetup {
    pub fn frame_width(&self) -> f32 {
        (self.width - self.margin_left - self.margin_right).max(1.0)
    }

    fn frame_top(&self) -> f32 {
        self.height - self.margin_top
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin_left: 72.0,
            margin_right: 72.0,
            margin_top: 72.0,
            margin_bottom: 18.0,
        }
    }
}

/// One line of text at a fixed position; `word_spacing` is the extra space
/// added to every space character (PDF `Tw`).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub font: Font,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub word_spacing: f32,
    pub text: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Lay out `story` into pages. Always returns at least one page.
pub fn paginate(
    story: &[Flowable],
    styles: &StyleSheet,
    setup: &PageSetup,
) -> Result<Vec<Page>, LayoutError> {
    let mut cursor = Cursor::new(setup);

    for flowable in story {
        match flowable {
            Flowable::Spacer { height } => cursor.skip(*height),
            Flowable::Paragraph { text, style } => {
                let style = styles
                    .get(style)
                    .ok_or_else(|| LayoutError::UnknownStyle(style.clone()))?;
                let lines = break_lines(text, style, setup.frame_width());
                let count = lines.len();
                for (idx, line) in lines.into_iter().enumerate() {
                    cursor.place(line, style, idx + 1 == count);
                }
                cursor.skip(style.space_after);
            }
        }
    }

    Ok(cursor.finish())
}

struct Cursor<'a> {
    setup: &'a PageSetup,
    pages: Vec<Page>,
    current: Page,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(setup: &'a PageSetup) -> Self {
        Self {
            setup,
            pages: Vec::new(),
            current: Page::default(),
            y: setup.frame_top(),
        }
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = self.setup.frame_top();
    }

    fn at_page_top(&self) -> bool {
        self.current.lines.is_empty()
    }

    /// Vertical space; dropped rather than carried onto the next page.
    fn skip(&mut self, height: f32) {
        if self.at_page_top() {
            return;
        }
        if self.y - height < self.setup.margin_bottom {
            self.new_page();
        } else {
            self.y -= height;
        }
    }

    fn place(&mut self, line: Line, style: &ParagraphStyle, last: bool) {
        if self.y - style.leading < self.setup.margin_bottom && !self.at_page_top() {
            self.new_page();
        }
        let frame = self.setup.frame_width();
        let slack = (frame - line.width).max(0.0);
        let (x, word_spacing) = match style.alignment {
            Alignment::Left => (self.setup.margin_left, 0.0),
            Alignment::Center => (self.setup.margin_left + slack / 2.0, 0.0),
            Alignment::Justify if !last && line.spaces > 0 => {
                (self.setup.margin_left, slack / line.spaces as f32)
            }
            Alignment::Justify => (self.setup.margin_left, 0.0),
        };
        self.current.lines.push(PlacedLine {
            font: style.font,
            size: style.font_size,
            x,
            y: self.y - style.font_size,
            word_spacing,
            text: line.text,
        });
        self.y -= style.leading;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.lines.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Line {
    text: Vec<u8>,
    width: f32,
    spaces: usize,
}

/// Greedy line breaking on spaces; words wider than the frame are split.
fn break_lines(text: &str, style: &ParagraphStyle, max_width: f32) -> Vec<Line> {
    let encoded = encode_text(text);
    let font = style.font;
    let size = style.font_size;
    let space_width = font.text_width(b" ", size);

    let mut lines = Vec::new();
    let mut current: Option<Line> = None;

    for word in encoded
        .bytes
        .split(|&b| b == b' ')
        .filter(|word| !word.is_empty())
    {
        for piece in split_wide_word(word, font, size, max_width) {
            let width = font.text_width(piece, size);
            match current.as_mut() {
                Some(line) if line.width + space_width + width <= max_width => {
                    line.text.push(b' ');
                    line.text.extend_from_slice(piece);
                    line.width += space_width + width;
                    line.spaces += 1;
                }
                _ => {
                    if let Some(done) = current.take() {
                        lines.push(done);
                    }
                    current = Some(Line {
                        text: piece.to_vec(),
                        width,
                        spaces: 0,
                    });
                }
            }
        }
    }

    if let Some(done) = current {
        lines.push(done);
    }
    lines
}

fn split_wide_word(word: &[u8], font: Font, size: f32, max_width: f32) -> Vec<&[u8]> {
    if font.text_width(word, size) <= max_width {
        return vec![word];
    }
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut width = 0.0;
    for (idx, &byte) in word.iter().enumerate() {
        let glyph = font.text_width(&[byte], size);
        if idx > start && width + glyph > max_width {
            pieces.push(&word[start..idx]);
            start = idx;
            width = 0.0;
        }
        width += glyph;
    }
    pieces.push(&word[start..]);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::styles::{BODY_STYLE, TITLE_STYLE};

    fn para(text: &str, style: &str) -> Flowable {
        Flowable::Paragraph {
            text: text.to_string(),
            style: style.to_string(),
        }
    }

    #[test]
    fn empty_story_still_has_one_page() {
        let pages = paginate(&[], &StyleSheet::default(), &PageSetup::default()).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn lines_never_exceed_the_frame() {
        let styles = StyleSheet::default();
        let style = styles.get(BODY_STYLE).unwrap();
        let text = "lorem ipsum dolor sit amet ".repeat(40);
        let lines = break_lines(&text, style, 468.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 468.0 + 1e-3);
            assert!(!line.text.starts_with(b" ") && !line.text.ends_with(b" "));
        }
    }

    #[test]
    fn overlong_word_is_split() {
        let styles = StyleSheet::default();
        let style = styles.get(BODY_STYLE).unwrap();
        let word = "W".repeat(200);
        let lines = break_lines(&word, style, 100.0);
        assert!(lines.len() > 1);
        let total: usize = lines.iter().map(|l| l.text.len()).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn justified_lines_stretch_except_the_last() {
        let setup = PageSetup::default();
        let text = "word ".repeat(120);
        let pages = paginate(&[para(&text, BODY_STYLE)], &StyleSheet::default(), &setup).unwrap();
        let lines = &pages[0].lines;
        assert!(lines.len() > 2);
        let (last, rest) = lines.split_last().unwrap();
        assert!(rest.iter().all(|l| l.word_spacing > 0.0));
        assert_eq!(last.word_spacing, 0.0);
        assert!(lines.iter().all(|l| l.x == setup.margin_left));
    }

    #[test]
    fn title_is_centered() {
        let setup = PageSetup::default();
        let pages = paginate(&[para("Sample", TITLE_STYLE)], &StyleSheet::default(), &setup)
            .unwrap();
        let line = &pages[0].lines[0];
        assert_eq!(line.font, Font::HelveticaBold);
        assert!(line.x > setup.margin_left);
        let width = Font::HelveticaBold.text_width(b"Sample", 18.0);
        assert!((line.x - (setup.margin_left + (setup.frame_width() - width) / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn long_story_breaks_across_pages_within_margins() {
        let setup = PageSetup::default();
        let story: Vec<Flowable> = (0..200)
            .flat_map(|i| {
                [
                    para(&format!("Paragraph number {i} with a few words."), BODY_STYLE),
                    Flowable::Spacer { height: 7.2 },
                ]
            })
            .collect();
        let pages = paginate(&story, &StyleSheet::default(), &setup).unwrap();
        assert!(pages.len() > 1);
        for page in &pages {
            assert!(!page.lines.is_empty());
            for line in &page.lines {
                assert!(line.y >= setup.margin_bottom - 1e-3);
                assert!(line.y <= setup.height - setup.margin_top);
            }
        }
        let total: usize = pages.iter().map(|p| p.lines.len()).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn unknown_style_is_an_error() {
        let err = paginate(
            &[para("x", "Fancy")],
            &StyleSheet::default(),
            &PageSetup::default(),
        )
        .unwrap_err();
        assert_eq!(err, LayoutError::UnknownStyle("Fancy".to_string()));
    }
}
