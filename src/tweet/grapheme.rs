//! Grapheme cluster splitting
//!
//! All annotation offsets are measured in extended grapheme clusters, so a
//! flag, a ZWJ emoji sequence or a letter with combining marks each count as
//! one position.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// Split text into its user-perceived characters
pub fn split(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Number of grapheme clusters in `text`
pub fn len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte offsets of every grapheme boundary in a string
///
/// Built once per body so that grapheme ranges can be sliced without
/// re-splitting the text for every annotation.
#[derive(Debug, Clone)]
pub struct GraphemeIndex<'a> {
    text: &'a str,
    /// `boundaries[i]` is the byte offset where grapheme `i` starts; the last
    /// entry is `text.len()`.
    boundaries: Vec<usize>,
}

impl<'a> GraphemeIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    /// Grapheme length of the indexed text
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slice by grapheme positions
    ///
    /// Returns `None` if the range is reversed or reaches past the end.
    pub fn slice(&self, range: Range<usize>) -> Option<&'a str> {
        if range.start > range.end || range.end > self.len() {
            return None;
        }
        let start = self.boundaries[range.start];
        let end = self.boundaries[range.end];
        Some(&self.text[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ascii() {
        assert_eq!(split("abc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_combining_mark() {
        // e + combining acute accent
        assert_eq!(split("e\u{0301}x"), vec!["e\u{0301}", "x"]);
    }

    #[test]
    fn test_split_flag_and_zwj_sequence() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let flag = "\u{1F1EF}\u{1F1F5}";
        let text = format!("{family}{flag}!");
        assert_eq!(split(&text), vec![family, flag, "!"]);
        assert_eq!(len(&text), 3);
    }

    #[test]
    fn test_index_slice() {
        let text = "a\u{1F1EF}\u{1F1F5}bc";
        let index = GraphemeIndex::new(text);
        assert_eq!(index.len(), 4);
        assert_eq!(index.slice(1..2), Some("\u{1F1EF}\u{1F1F5}"));
        assert_eq!(index.slice(2..4), Some("bc"));
        assert_eq!(index.slice(0..0), Some(""));
    }

    #[test]
    fn test_index_slice_out_of_bounds() {
        let index = GraphemeIndex::new("abc");
        assert_eq!(index.slice(2..4), None);
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = index.slice(2..1);
        assert_eq!(reversed, None);
    }

    #[test]
    fn test_index_empty_text() {
        let index = GraphemeIndex::new("");
        assert!(index.is_empty());
        assert_eq!(index.slice(0..0), Some(""));
    }
}
