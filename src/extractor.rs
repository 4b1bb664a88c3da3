//! Markup-to-text extraction.
//!
//! A content document is parsed once with `scraper`, flattened into a list of
//! [`MarkupEvent`]s in encounter order, and fed through [`TextExtractor`].
//! The extractor keeps only text and two kinds of structural markers:
//! [`STRONG_BREAK`] around headings and [`WEAK_BREAK`] after paragraph-like
//! elements. Everything else about the markup is thrown away.

use scraper::{ElementRef, Html, Node};
use tracing::trace;

/// Paragraph or heading boundary.
pub const STRONG_BREAK: &str = "\n\n";
/// Line-level boundary (end of `p`, `div` or `br`).
pub const WEAK_BREAK: &str = "\n";

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
const LINE_BREAK_TAGS: [&str; 3] = ["p", "div", "br"];

/// One step of a streaming walk over a document. Attributes are not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupEvent<'a> {
    Open(&'a str),
    Close(&'a str),
    Text(&'a str),
}

/// Flatten a parsed document into open/text/close events.
pub fn markup_events(document: &Html) -> Vec<MarkupEvent<'_>> {
    let mut events = Vec::new();
    walk(document.root_element(), &mut events);
    events
}

fn walk<'a>(element: ElementRef<'a>, events: &mut Vec<MarkupEvent<'a>>) {
    let name = element.value().name();
    events.push(MarkupEvent::Open(name));
    for child in element.children() {
        match child.value() {
            Node::Text(text) => events.push(MarkupEvent::Text(&**text)),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    walk(child, events);
                }
            }
            _ => {}
        }
    }
    events.push(MarkupEvent::Close(name));
}

/// Streaming state machine that turns markup events into a text stream.
#[derive(Debug, Default)]
pub struct TextExtractor {
    stream: String,
    in_heading: bool,
}

impl TextExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: MarkupEvent<'_>) {
        match event {
            MarkupEvent::Open(tag) => {
                if is_heading(tag) {
                    self.in_heading = true;
                    self.stream.push_str(STRONG_BREAK);
                }
            }
            MarkupEvent::Close(tag) => {
                if is_line_break(tag) {
                    self.stream.push_str(WEAK_BREAK);
                } else if is_heading(tag) {
                    self.in_heading = false;
                    self.stream.push_str(STRONG_BREAK);
                }
            }
            MarkupEvent::Text(data) => {
                let trimmed = data.trim();
                if !trimmed.is_empty() {
                    self.stream.push_str(trimmed);
                    self.stream.push(' ');
                }
            }
        }
    }

    pub fn feed<'a>(&mut self, events: impl IntoIterator<Item = MarkupEvent<'a>>) {
        for event in events {
            self.handle(event);
        }
    }

    /// Whether the last heading opened has not been closed yet. Nothing in
    /// the output depends on it.
    pub fn in_heading(&self) -> bool {
        self.in_heading
    }

    pub fn text(&self) -> &str {
        &self.stream
    }

    pub fn into_text(self) -> String {
        self.stream
    }
}

/// Parse `markup` and return its raw text stream with break markers.
pub fn extract_text(markup: &str) -> String {
    let document = Html::parse_document(markup);
    let mut extractor = TextExtractor::new();
    extractor.feed(markup_events(&document));
    trace!(
        bytes = extractor.text().len(),
        open_heading = extractor.in_heading(),
        "Extracted text stream"
    );
    extractor.into_text()
}

fn is_heading(tag: &str) -> bool {
    HEADING_TAGS.iter().any(|h| tag.eq_ignore_ascii_case(h))
}

fn is_line_break(tag: &str) -> bool {
    LINE_BREAK_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t))
}
