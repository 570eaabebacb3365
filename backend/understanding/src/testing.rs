//! Fixtures for stage-level tests.

use chronoforge_classifier::{PeriodIntervalClassifier, RuleOnly};
use chronoforge_core::{ChronoError, EntityGraph, IdAllocator, ReferenceToken, TemporalPhrase};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::PhraseContext;
use crate::pipeline::StageFn;
use crate::segment::mark_temporal;
use crate::state::ExtractionState;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

/// Whitespace tokens tagged from `tags` (missing tags default to `NN`),
/// then marked.
pub(crate) fn tokenize(text: &str, tags: &[&str]) -> Vec<ReferenceToken> {
    let mut tokens: Vec<ReferenceToken> = TOKEN_RE
        .find_iter(text)
        .enumerate()
        .map(|(i, m)| {
            ReferenceToken::new(m.as_str(), m.start()).with_pos(tags.get(i).copied().unwrap_or("NN"))
        })
        .collect();
    mark_temporal(&mut tokens);
    tokens
}

pub(crate) fn try_run(
    text: &str,
    tags: &[&str],
    classifier: &dyn PeriodIntervalClassifier,
    stages: &[StageFn],
) -> Result<(EntityGraph, ExtractionState), ChronoError> {
    let tokens = tokenize(text, tags);
    let phrase = TemporalPhrase::new(text, 0);
    let ctx = PhraseContext::new(&phrase, &tokens, classifier);
    let mut graph = EntityGraph::new();
    let mut ids = IdAllocator::new();
    let mut state = ExtractionState::default();
    for stage in stages {
        state = stage(&ctx, &mut graph, &mut ids, state)?;
    }
    Ok((graph, state))
}

pub(crate) fn run_stages(text: &str, stages: &[StageFn]) -> (EntityGraph, ExtractionState) {
    try_run(text, &[], &RuleOnly::new(), stages).expect("stages")
}

pub(crate) fn run_tagged(
    text: &str,
    tags: &[&str],
    stages: &[StageFn],
) -> (EntityGraph, ExtractionState) {
    try_run(text, tags, &RuleOnly::new(), stages).expect("stages")
}

pub(crate) fn run_with(
    text: &str,
    classifier: &dyn PeriodIntervalClassifier,
    stages: &[StageFn],
) -> (EntityGraph, ExtractionState) {
    try_run(text, &[], classifier, stages).expect("stages")
}

pub(crate) fn try_run_with(
    text: &str,
    classifier: &dyn PeriodIntervalClassifier,
    stages: &[StageFn],
) -> Result<(EntityGraph, ExtractionState), ChronoError> {
    try_run(text, &[], classifier, stages)
}
