// crates/locodb-core/src/text.rs

//! Text normalization shared by indexing and querying.
//!
//! Both sides of a match go through [`normalize`], so two strings that differ
//! only in case, diacritics or punctuation produce identical token sequences.

use serde::Serialize;
use std::collections::HashSet;

/// A normalized token together with the character span it came from.
///
/// `start`/`end` are *character* offsets (not bytes) into the original text,
/// half-open: `text.chars().skip(start).take(end - start)` is the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use locodb_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("Straße"), "strasse");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Split `text` into lowercase ASCII tokens with their source offsets.
///
/// Every character is transliterated with `deunicode`; ASCII letters and
/// digits are kept, anything else (whitespace, punctuation, symbols) ends the
/// current token. A character that transliterates to several letters
/// (`ß` → `ss`) still counts as one source character for the offsets, and a
/// character that transliterates to nothing (combining marks) extends the
/// token it sits in.
///
/// # Examples
///
/// ```rust
/// use locodb_core::text::normalize;
///
/// let tokens = normalize("Dentists in Abercarn");
/// let last = tokens.last().unwrap();
/// assert_eq!(last.text, "abercarn");
/// assert_eq!((last.start, last.end), (12, 20));
/// ```
pub fn normalize(text: &str) -> Vec<Token> {
    let mut out = TokenSink::default();

    for (idx, ch) in text.chars().enumerate() {
        if ch.is_ascii() {
            out.feed(idx, ch);
            continue;
        }
        match deunicode::deunicode_char(ch) {
            Some("") => out.extend(idx),
            Some(folded) => {
                for c in folded.chars() {
                    out.feed(idx, c);
                }
            }
            None => out.flush(),
        }
    }
    out.finish()
}

/// Normalize and re-join with single spaces; the canonical form of a phrase.
///
/// ```rust
/// use locodb_core::text::normalize_phrase;
///
/// assert_eq!(normalize_phrase("  Saint-Étienne "), "saint etienne");
/// ```
pub fn normalize_phrase(text: &str) -> String {
    normalize(text)
        .into_iter()
        .map(|t| t.text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// English function words ("in", "the", "and", ...) from the `stop-words`
/// lists, folded the same way query tokens are.
///
/// Entries that would split into several tokens (`don't`) are left out,
/// since they can never equal a single query token.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn english() -> Self {
        let words = stop_words::get(stop_words::LANGUAGE::English)
            .iter()
            .map(|w| fold_key(w.trim()))
            .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_alphanumeric()))
            .collect();
        Self { words }
    }

    /// `token` must already be normalized.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[derive(Default)]
struct TokenSink {
    tokens: Vec<Token>,
    current: String,
    start: usize,
    end: usize,
}

impl TokenSink {
    fn feed(&mut self, idx: usize, c: char) {
        if c.is_ascii_alphanumeric() {
            if self.current.is_empty() {
                self.start = idx;
            }
            self.current.push(c.to_ascii_lowercase());
            self.end = idx + 1;
        } else {
            self.flush();
        }
    }

    fn extend(&mut self, idx: usize) {
        if !self.current.is_empty() {
            self.end = idx + 1;
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.tokens.push(Token {
                text: std::mem::take(&mut self.current),
                start: self.start,
                end: self.end,
            });
        }
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush();
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(s: &str) -> Vec<String> {
        normalize(s).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn lowercases_and_splits_on_whitespace() {
        assert_eq!(texts("Dental  Abercarn"), vec!["dental", "abercarn"]);
    }

    #[test]
    fn strips_diacritics() {
        assert_eq!(texts("Łódź"), vec!["lodz"]);
        assert_eq!(texts("Zürich"), vec!["zurich"]);
        assert_eq!(texts("Straße"), vec!["strasse"]);
    }

    #[test]
    fn punctuation_is_a_boundary() {
        assert_eq!(texts("St. John's"), vec!["st", "john", "s"]);
        assert_eq!(texts("Saint-Étienne"), vec!["saint", "etienne"]);
        assert!(texts("...---...").is_empty());
        assert!(texts("").is_empty());
    }

    #[test]
    fn offsets_are_character_based() {
        let tokens = normalize("São Paulo");
        assert_eq!((tokens[0].start, tokens[0].end), (0, 3));
        assert_eq!((tokens[1].start, tokens[1].end), (4, 9));
    }

    #[test]
    fn expanding_characters_keep_one_source_offset() {
        let tokens = normalize("Großenhain x");
        assert_eq!(tokens[0].text, "grossenhain");
        assert_eq!((tokens[0].start, tokens[0].end), (0, 10));
        assert_eq!((tokens[1].start, tokens[1].end), (11, 12));
    }

    #[test]
    fn combining_marks_do_not_split_words() {
        // "e" followed by U+0301 COMBINING ACUTE ACCENT
        let tokens = normalize("Cafe\u{301} noir");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "cafe");
        assert_eq!(tokens[1].start, 6);
    }

    #[test]
    fn phrase_form_is_symmetric_with_tokens() {
        assert_eq!(normalize_phrase("ABERCARN"), "abercarn");
        assert_eq!(normalize_phrase("Newport, Gwent"), "newport gwent");
        assert_eq!(fold_key("Abercarn"), normalize_phrase("abercarn"));
    }

    #[test]
    fn english_stop_words_are_folded_tokens() {
        let stop = StopWords::english();
        assert!(!stop.is_empty());
        for w in ["in", "the", "and", "to"] {
            assert!(stop.contains(w), "{w}");
        }
        assert!(!stop.contains("abercarn"));
        assert!(!stop.contains("cardiff"));
        assert!(StopWords::default().is_empty());
    }
}
