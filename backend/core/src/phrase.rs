use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::span::Span;

/// A candidate temporal phrase located in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalPhrase {
    pub text: String,
    #[serde(flatten)]
    pub span: Span,
    /// Document creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_time: Option<NaiveDateTime>,
}

impl TemporalPhrase {
    pub fn new(text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        let span = Span::new(start, start + text.len());
        Self { text, span, doc_time: None }
    }

    pub fn with_doc_time(mut self, doc_time: Option<NaiveDateTime>) -> Self {
        self.doc_time = doc_time;
        self
    }

    /// Convert phrase-local offsets to a document span.
    pub fn absolute(&self, start: usize, end: usize) -> Span {
        Span::new(start, end).shift(self.span.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_offsets_add_phrase_start() {
        let phrase = TemporalPhrase::new("next Monday", 40);
        assert_eq!(phrase.span, Span::new(40, 51));
        assert_eq!(phrase.absolute(5, 11), Span::new(45, 51));
    }
}
