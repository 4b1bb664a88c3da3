//! Paragraph reconstruction and text cleaning.
//!
//! The raw stream from the extractor is split on strong breaks *first*, and
//! only then is each segment collapsed and cleaned. Cleaning turns every
//! whitespace run, break markers included, into a single space, so doing it
//! before the split would merge a whole document into one paragraph.

use crate::extractor::STRONG_BREAK;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;
use std::collections::BTreeMap;

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Clone)]
pub struct TextNormalizer {
    /// Longest key first, so overlapping keys resolve deterministically.
    replacements: Vec<(String, String)>,
}

impl TextNormalizer {
    pub fn new(replacements: &BTreeMap<String, String>) -> Self {
        let mut entries: Vec<(String, String)> = replacements
            .iter()
            .filter(|(from, _)| !from.is_empty())
            .map(|(from, to)| (from.clone(), to.clone()))
            .collect();
        entries.sort_by_key(|(from, _)| Reverse(from.chars().count()));
        Self {
            replacements: entries,
        }
    }

    /// Split a raw extractor stream into cleaned, non-empty paragraphs.
    pub fn paragraphs(&self, stream: &str) -> Vec<String> {
        stream
            .split(STRONG_BREAK)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| self.clean_text(segment))
            .filter(|paragraph| !paragraph.is_empty())
            .collect()
    }

    /// Collapse whitespace, map typographic punctuation to ASCII and trim.
    /// Replacement keys therefore see single spaces only.
    pub fn clean_text(&self, input: &str) -> String {
        let mut text = RE_WHITESPACE.replace_all(input, " ").into_owned();
        for (from, to) in &self.replacements {
            if text.contains(from.as_str()) {
                text = text.replace(from.as_str(), to);
            }
        }
        text.trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(&crate::config::ConverterConfig::default().replacements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs_including_breaks() {
        let normalizer = TextNormalizer::default();
        assert_eq!(
            normalizer.clean_text("  Hello \n\n  world.\t\n"),
            "Hello world."
        );
    }

    #[test]
    fn typographic_punctuation_becomes_ascii() {
        let normalizer = TextNormalizer::default();
        let input = "\u{2018}a\u{2019} \u{201C}b\u{201D} c\u{2013}d\u{2014}e";
        let cleaned = normalizer.clean_text(input);
        assert_eq!(cleaned, "'a' \"b\" c-d-e");
        assert!(cleaned.is_ascii());
    }

    #[test]
    fn other_characters_are_untouched() {
        let normalizer = TextNormalizer::default();
        let input = "Café «naïve» — 東京 ‐ ½";
        assert_eq!(normalizer.clean_text(input), "Café «naïve» - 東京 ‐ ½");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let normalizer = TextNormalizer::default();
        for input in [
            "  \u{201C}Quoted\u{201D}\u{2014}and   spaced \n text ",
            "plain",
            "",
            "\n\n\n",
            "tabs\tand\u{00A0}nbsp",
        ] {
            let once = normalizer.clean_text(input);
            assert_eq!(normalizer.clean_text(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn paragraphs_split_before_collapsing() {
        let normalizer = TextNormalizer::default();
        let stream = "\n\nTitle \n\nHello  world. \n";
        assert_eq!(normalizer.paragraphs(stream), vec!["Title", "Hello world."]);

        // Collapsing first would erase every boundary.
        let collapsed_first = normalizer.clean_text(stream);
        assert_eq!(
            normalizer.paragraphs(&collapsed_first),
            vec!["Title Hello world."]
        );
    }

    #[test]
    fn weak_breaks_stay_inside_a_paragraph() {
        let normalizer = TextNormalizer::default();
        let stream = "first line \nsecond line \n\n\nnext heading \n\n";
        assert_eq!(
            normalizer.paragraphs(stream),
            vec!["first line second line", "next heading"]
        );
    }

    #[test]
    fn empty_and_whitespace_segments_are_dropped() {
        let normalizer = TextNormalizer::default();
        assert!(normalizer.paragraphs("").is_empty());
        assert!(normalizer.paragraphs("\n\n \n\n\t\n\n").is_empty());
    }

    #[test]
    fn custom_replacements_apply_longest_first() {
        let mut table = BTreeMap::new();
        table.insert(".".to_string(), "!".to_string());
        table.insert("...".to_string(), "\u{2026}".to_string());
        let normalizer = TextNormalizer::new(&table);
        assert_eq!(normalizer.clean_text("Wait... what."), "Wait\u{2026} what!");
    }

    #[test]
    fn replacements_run_after_whitespace_collapse() {
        let mut table = BTreeMap::new();
        table.insert("Mr. Smith".to_string(), "Mister Smith".to_string());
        table.insert("A\nB".to_string(), "never".to_string());
        let normalizer = TextNormalizer::new(&table);
        assert_eq!(normalizer.clean_text("Mr.\n\t Smith"), "Mister Smith");
        assert_eq!(normalizer.clean_text("A\nB"), "A B");
    }
}
