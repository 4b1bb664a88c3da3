//! The ordered list of flowables handed to a renderer, and the
//! [`PageRenderer`] seam between the converter and a concrete backend.

use crate::pdf::styles::{BODY_STYLE, BYLINE_STYLE, TITLE_STYLE};
use anyhow::Result;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Points per inch.
pub const INCH: f32 = 72.0;

const TITLE_GAP: f32 = 0.2 * INCH;
const BYLINE_GAP: f32 = 0.5 * INCH;
const PARAGRAPH_GAP: f32 = 0.1 * INCH;

#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph { text: String, style: String },
    Spacer { height: f32 },
}

/// Document-level metadata written alongside the pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("unknown paragraph style `{0}`")]
    UnknownStyle(String),
    #[error("paragraph has no characters the font can draw")]
    NothingToDraw,
}

pub trait PageRenderer {
    /// Prepare `text` for the named style, or reject it.
    fn paragraph(&self, text: &str, style: &str) -> Result<Flowable, LayoutError>;

    /// Paginate `story` and write the finished document to `out`.
    fn render(&self, story: &[Flowable], info: &DocumentInfo, out: &Path) -> Result<()>;
}

/// Append-only story assembly with paragraph-level failure isolation.
pub struct StoryBuilder<'r, R: PageRenderer> {
    renderer: &'r R,
    flowables: Vec<Flowable>,
    paragraphs: usize,
    skipped: usize,
}

impl<'r, R: PageRenderer> StoryBuilder<'r, R> {
    pub fn new(renderer: &'r R) -> Self {
        Self {
            renderer,
            flowables: Vec::new(),
            paragraphs: 0,
            skipped: 0,
        }
    }

    /// Bold title and an italic "by" line, each followed by its own gap.
    pub fn front_matter(&mut self, info: &DocumentInfo) {
        if let Some(title) = &info.title {
            self.push(title, TITLE_STYLE, TITLE_GAP);
        }
        if let Some(author) = &info.author {
            self.push(&format!("by {author}"), BYLINE_STYLE, BYLINE_GAP);
        }
    }

    pub fn body_paragraph(&mut self, text: &str) {
        if self.push(text, BODY_STYLE, PARAGRAPH_GAP) {
            self.paragraphs += 1;
        }
    }

    fn push(&mut self, text: &str, style: &str, gap: f32) -> bool {
        match self.renderer.paragraph(text, style) {
            Ok(paragraph) => {
                self.flowables.push(paragraph);
                self.flowables.push(Flowable::Spacer { height: gap });
                true
            }
            Err(err) => {
                self.skipped += 1;
                debug!(%style, chars = text.chars().count(), "Skipping paragraph: {err}");
                false
            }
        }
    }

    pub fn paragraphs(&self) -> usize {
        self.paragraphs
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> Vec<Flowable> {
        self.flowables
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records what it is asked to render; rejects paragraphs containing `<`.
    #[derive(Default)]
    pub(crate) struct RecordingRenderer {
        pub rendered: RefCell<Vec<(Vec<Flowable>, DocumentInfo, std::path::PathBuf)>>,
    }

    impl PageRenderer for RecordingRenderer {
        fn paragraph(&self, text: &str, style: &str) -> Result<Flowable, LayoutError> {
            if text.contains('<') {
                return Err(LayoutError::NothingToDraw);
            }
            Ok(Flowable::Paragraph {
                text: text.to_string(),
                style: style.to_string(),
            })
        }

        fn render(&self, story: &[Flowable], info: &DocumentInfo, out: &Path) -> Result<()> {
            self.rendered
                .borrow_mut()
                .push((story.to_vec(), info.clone(), out.to_path_buf()));
            Ok(())
        }
    }

    fn paragraph(text: &str, style: &str) -> Flowable {
        Flowable::Paragraph {
            text: text.to_string(),
            style: style.to_string(),
        }
    }

    #[test]
    fn front_matter_is_title_then_byline() {
        let renderer = RecordingRenderer::default();
        let mut builder = StoryBuilder::new(&renderer);
        builder.front_matter(&DocumentInfo {
            title: Some("Sample".to_string()),
            author: Some("Jane Doe".to_string()),
        });
        let story = builder.finish();
        assert_eq!(
            story,
            vec![
                paragraph("Sample", TITLE_STYLE),
                Flowable::Spacer { height: TITLE_GAP },
                paragraph("by Jane Doe", BYLINE_STYLE),
                Flowable::Spacer { height: BYLINE_GAP },
            ]
        );
    }

    #[test]
    fn missing_metadata_leaves_no_front_matter() {
        let renderer = RecordingRenderer::default();
        let mut builder = StoryBuilder::new(&renderer);
        builder.front_matter(&DocumentInfo::default());
        assert!(builder.finish().is_empty());
    }

    #[test]
    fn rejected_paragraph_is_skipped_and_the_rest_kept() {
        let renderer = RecordingRenderer::default();
        let mut builder = StoryBuilder::new(&renderer);
        builder.body_paragraph("first");
        builder.body_paragraph("a <broken paragraph");
        builder.body_paragraph("third");
        assert_eq!(builder.paragraphs(), 2);
        assert_eq!(builder.skipped(), 1);
        let texts: Vec<String> = builder
            .finish()
            .into_iter()
            .filter_map(|f| match f {
                Flowable::Paragraph { text, .. } => Some(text),
                Flowable::Spacer { .. } => None,
            })
            .collect();
        assert_eq!(texts, vec!["first", "third"]);
    }
}
