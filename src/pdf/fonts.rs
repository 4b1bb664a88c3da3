//! Standard Type1 Helvetica faces: widths and WinAnsi encoding.
//!
//! The standard 14 fonts need no embedding, so all the writer has to know is
//! how wide each glyph is and which byte selects it.

use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::Helvetica, Font::HelveticaBold, Font::HelveticaOblique];

    pub fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// Name under `/Resources /Font` used by content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
        }
    }

    /// Advance width of an encoded byte in 1/1000 em.
    pub fn glyph_width(self, byte: u8) -> u16 {
        let table = match self {
            Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
            Font::Helvetica | Font::HelveticaOblique => &HELVETICA_WIDTHS,
        };
        match byte {
            0x20..=0x7E => table[(byte - 0x20) as usize],
            0x91 | 0x92 => 222,
            0x93 | 0x94 => 333,
            0x95 => 350,
            0x96 => 556,
            0x85 | 0x89 | 0x97 | 0x99 => 1000,
            0xA0 => table[0],
            _ => match decode_win_ansi(byte).and_then(base_letter) {
                Some(base) => table[(base as u8 - 0x20) as usize],
                None => 556,
            },
        }
    }

    /// Width of an encoded string at `size` points.
    pub fn text_width(self, bytes: &[u8], size: f32) -> f32 {
        let units: u32 = bytes.iter().map(|&b| u32::from(self.glyph_width(b))).sum();
        units as f32 * size / 1000.0
    }
}

/// Characters 0x80..=0x9F of WinAnsiEncoding; the rest of the upper half is
/// Latin-1.
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

pub fn encode_win_ansi(ch: char) -> Option<u8> {
    match ch as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(ch as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, byte)| *byte),
    }
}

fn decode_win_ansi(byte: u8) -> Option<char> {
    match byte {
        0x20..=0x7E | 0xA0..=0xFF => Some(byte as char),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(_, b)| *b == byte)
            .map(|(c, _)| *c),
    }
}

/// ASCII letter an accented character decomposes to, if any.
fn base_letter(ch: char) -> Option<char> {
    ch.to_string()
        .nfd()
        .next()
        .filter(|base| base.is_ascii_alphabetic())
}

/// Result of encoding one piece of text for a simple font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// Visible (non-space) characters that have a glyph.
    pub drawable: usize,
    /// Characters replaced with `?`.
    pub substituted: usize,
}

/// NFC-compose `text` and encode it; unencodable characters become `?`.
pub fn encode_text(text: &str) -> Encoded {
    let mut encoded = Encoded {
        bytes: Vec::with_capacity(text.len()),
        drawable: 0,
        substituted: 0,
    };
    for ch in text.nfc() {
        match encode_win_ansi(ch) {
            Some(byte) => {
                if byte != b' ' && byte != 0xA0 {
                    encoded.drawable += 1;
                }
                encoded.bytes.push(byte);
            }
            None if ch.is_whitespace() => encoded.bytes.push(b' '),
            None => {
                encoded.substituted += 1;
                encoded.bytes.push(b'?');
            }
        }
    }
    encoded
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_latin1_encode_directly() {
        assert_eq!(encode_win_ansi('A'), Some(b'A'));
        assert_eq!(encode_win_ansi('é'), Some(0xE9));
        assert_eq!(encode_win_ansi('—'), Some(0x97));
        assert_eq!(encode_win_ansi('東'), None);
        assert_eq!(encode_win_ansi('\u{7}'), None);
    }

    #[test]
    fn decomposed_accents_are_composed_before_encoding() {
        let encoded = encode_text("cafe\u{301}");
        assert_eq!(encoded.bytes, b"caf\xE9".to_vec());
        assert_eq!(encoded.drawable, 4);
        assert_eq!(encoded.substituted, 0);
    }

    #[test]
    fn unencodable_characters_are_counted_and_substituted() {
        let encoded = encode_text("Tokyo 東京");
        assert_eq!(encoded.bytes, b"Tokyo ??".to_vec());
        assert_eq!(encoded.drawable, 5);
        assert_eq!(encoded.substituted, 2);
    }

    #[test]
    fn widths_follow_the_afm_tables() {
        assert_eq!(Font::Helvetica.glyph_width(b' '), 278);
        assert_eq!(Font::Helvetica.glyph_width(b'i'), 222);
        assert_eq!(Font::HelveticaBold.glyph_width(b'i'), 278);
        assert_eq!(Font::HelveticaOblique.glyph_width(b'W'), 944);
        // Accented letters borrow the width of their base letter.
        assert_eq!(Font::Helvetica.glyph_width(0xE9), 556);
        assert_eq!(Font::Helvetica.glyph_width(0xC9), 667);
        assert!((Font::Helvetica.text_width(b"ii", 10.0) - 4.44).abs() < 1e-4);
    }

    #[test]
    fn every_face_has_a_distinct_resource() {
        let mut names: Vec<_> = Font::ALL.iter().map(|f| f.resource_name()).collect();
        names.dedup();
        assert_eq!(names.len(), Font::ALL.len());
    }
}
