//! Word segmentation and normalization over phrase text.
//!
//! Every helper keeps byte offsets into the input so matches can be mapped
//! back to exact document spans.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

/// A whitespace-delimited word.
///
/// `start..end` covers the word with leading and trailing ASCII punctuation
/// trimmed; `norm` is the lowercased word with all ASCII punctuation removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word<'a> {
    pub start: usize,
    pub end: usize,
    pub raw: &'a str,
    pub norm: String,
}

impl<'a> Word<'a> {
    /// End offset including a single trailing `.` (abbreviations like "Nov.").
    pub fn end_with_dot(&self, text: &str) -> usize {
        if text[self.end..].starts_with('.') {
            self.end + 1
        } else {
            self.end
        }
    }
}

/// Split `text` into [`Word`]s. Tokens made only of punctuation (such as
/// `<`) keep their full extent and raw form.
pub fn words(text: &str) -> Vec<Word<'_>> {
    WORD_RE
        .find_iter(text)
        .map(|m| {
            let raw = m.as_str();
            let inner = raw.trim_matches(|c: char| c.is_ascii_punctuation());
            if inner.is_empty() {
                return Word { start: m.start(), end: m.end(), raw, norm: raw.to_string() };
            }
            let lead = raw.len() - raw.trim_start_matches(|c: char| c.is_ascii_punctuation()).len();
            let start = m.start() + lead;
            Word {
                start,
                end: start + inner.len(),
                raw,
                norm: normalize(inner),
            }
        })
        .filter(|w| !w.norm.is_empty())
        .collect()
}

/// Lowercase and drop ASCII punctuation.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .to_lowercase()
}

/// Replace ASCII punctuation with spaces. Byte length is preserved.
pub fn mask_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect()
}

/// Replace the listed characters with spaces. Byte length is preserved for
/// ASCII targets.
pub fn mask_chars(text: &str, targets: &[char]) -> String {
    text.chars()
        .map(|c| if targets.contains(&c) { ' ' } else { c })
        .collect()
}

pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
