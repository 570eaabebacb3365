use serde::{Deserialize, Serialize};

use crate::span::Span;

/// One upstream token with its tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceToken {
    pub text: String,
    #[serde(flatten)]
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    /// Index of the sentence this token belongs to.
    #[serde(default)]
    pub sentence: usize,
    /// True for the last token of a sentence.
    #[serde(default)]
    pub sentence_boundary: bool,
    #[serde(default)]
    pub temporal: bool,
    #[serde(default)]
    pub numeric: bool,
}

impl ReferenceToken {
    pub fn new(text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        let span = Span::new(start, start + text.len());
        Self {
            text,
            span,
            pos: None,
            sentence: 0,
            sentence_boundary: false,
            temporal: false,
            numeric: false,
        }
    }

    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    pub fn with_sentence(mut self, sentence: usize) -> Self {
        self.sentence = sentence;
        self
    }

    pub fn with_temporal(mut self, temporal: bool) -> Self {
        self.temporal = temporal;
        self
    }

    pub fn pos(&self) -> &str {
        self.pos.as_deref().unwrap_or("")
    }

    /// Noun tags (NN, NNS, NNP, NNPS).
    pub fn is_noun(&self) -> bool {
        self.pos().starts_with("NN")
    }

    /// Lowercased text with ASCII punctuation removed.
    pub fn normalized(&self) -> String {
        self.text
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect::<String>()
            .to_lowercase()
    }
}

/// Index of the first token overlapping `span`.
pub fn token_index_at(tokens: &[ReferenceToken], span: Span) -> Option<usize> {
    tokens.iter().position(|t| t.span.overlaps(&span))
}
