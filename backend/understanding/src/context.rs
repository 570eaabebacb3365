use chrono::NaiveDateTime;
use chronoforge_classifier::{DEFAULT_WINDOW, PeriodIntervalClassifier};
use chronoforge_core::text::{Word, words};
use chronoforge_core::{ReferenceToken, Span, TemporalPhrase, token_index_at};

/// Everything a stage may read while extracting from one phrase.
#[derive(Clone, Copy)]
pub struct PhraseContext<'a> {
    pub phrase: &'a TemporalPhrase,
    pub tokens: &'a [ReferenceToken],
    pub classifier: &'a dyn PeriodIntervalClassifier,
    /// Bag-of-words window for classifier features.
    pub window: usize,
}

impl<'a> PhraseContext<'a> {
    pub fn new(
        phrase: &'a TemporalPhrase,
        tokens: &'a [ReferenceToken],
        classifier: &'a dyn PeriodIntervalClassifier,
    ) -> Self {
        Self { phrase, tokens, classifier, window: DEFAULT_WINDOW }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn text(&self) -> &'a str {
        &self.phrase.text
    }

    pub fn words(&self) -> Vec<Word<'a>> {
        words(&self.phrase.text)
    }

    pub fn doc_time(&self) -> Option<NaiveDateTime> {
        self.phrase.doc_time
    }

    /// Document span of phrase-local offsets.
    pub fn absolute(&self, start: usize, end: usize) -> Span {
        self.phrase.absolute(start, end)
    }

    /// Index of the reference token under phrase-local offsets.
    pub fn token_index(&self, start: usize, end: usize) -> Option<usize> {
        token_index_at(self.tokens, self.absolute(start, end))
    }

    /// POS check used to reject homographs; no token or no tag means no.
    pub fn is_noun_at(&self, start: usize, end: usize) -> bool {
        self.token_index(start, end)
            .map(|i| self.tokens[i].is_noun())
            .unwrap_or(false)
    }
}
