//! Interval words ("week", "months", "daily") resolved to a Period or a
//! Calendar-Interval.
//!
//! Most terms are ambiguous and go through the classifier. A few are fixed:
//! "yesterday" is the last day, "daily" a repeating day, and vague words
//! like "soon" an unknown period.

use chronoforge_classifier::{IntervalClass, extract_features};
use chronoforge_core::{
    ChronoError, EntityGraph, EntityKind, IdAllocator, Link, Operator, ReferenceToken, Semantics,
    TimeUnit,
};
use tracing::debug;

use super::operator_entity;
use crate::context::PhraseContext;
use crate::lexicon::{interval_unit, operator_word, preceding_number, single_hit, split_embedded};
use crate::state::ExtractionState;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Term {
    word: String,
    unit: TimeUnit,
    start: usize,
    end: usize,
    /// Number glued to the term in the same word ("3weeks").
    glued: Option<(i64, usize, usize)>,
}

fn find_term(ctx: &PhraseContext<'_>) -> Option<Term> {
    let words = ctx.words();
    if let Some((i, unit)) = single_hit(&words, interval_unit) {
        let w = &words[i];
        return Some(Term { word: w.norm.clone(), unit, start: w.start, end: w.end, glued: None });
    }
    let text = ctx.text();
    words.iter().find_map(|w| {
        let core = &text[w.start..w.end];
        let (value, at, word) = split_embedded(core)?;
        let digits = core[..at].trim_end_matches('-').len();
        Some(Term {
            word: word.to_string(),
            unit: interval_unit(word)?,
            start: w.start + at,
            end: w.end,
            glued: Some((value, w.start, w.start + digits)),
        })
    })
}

/// Ask the classifier about the term. Without a reference token under the
/// term, the term alone stands in as a one-token context.
fn classify(ctx: &PhraseContext<'_>, term: &Term) -> Result<IntervalClass, ChronoError> {
    let template = ctx.classifier.template();
    let features = match ctx.token_index(term.start, term.end) {
        Some(index) => extract_features(ctx.tokens, index, template, ctx.window),
        None => {
            let lone = [ReferenceToken::new(term.word.as_str(), 0).with_temporal(true)];
            extract_features(&lone, 0, template, ctx.window)
        }
    };
    let class = ctx.classifier.classify(&features)?;
    debug!(term = %term.word, ?class, "period or interval");
    Ok(class)
}

pub fn build_period_interval(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    let Some(term) = find_term(ctx) else {
        return Ok(state);
    };
    let span = ctx.absolute(term.start, term.end);

    if term.word == "yesterday" {
        let day = graph.add(ids, span, EntityKind::calendar_interval(TimeUnit::Day));
        graph.add(ids, span, EntityKind::Last(Operator::over_repeating(day)));
        return Ok(state);
    }

    let class = match (term.word.as_str(), term.unit) {
        ("daily", _) => IntervalClass::CalendarInterval,
        (_, TimeUnit::Unknown) => IntervalClass::Period,
        _ => classify(ctx, &term)?,
    };
    let (id, operand) = match class {
        IntervalClass::Period => {
            let id = graph.add(ids, span, EntityKind::period(term.unit));
            (id, Operator::over_period(id))
        }
        IntervalClass::CalendarInterval => {
            let id = graph.add(ids, span, EntityKind::calendar_interval(term.unit));
            (id, Operator::over_repeating(id))
        }
    };

    // "this" directly before the term, otherwise any this/next/last word.
    let prior_this = ctx
        .token_index(term.start, term.end)
        .and_then(|i| i.checked_sub(1))
        .map(|i| &ctx.tokens[i])
        .filter(|t| t.normalized() == "this" && ctx.phrase.span.contains(&t.span));
    match prior_this {
        Some(token) => {
            graph.add(ids, token.span, EntityKind::This(operand));
        }
        None => {
            let words = ctx.words();
            if let Some((i, op)) = single_hit(&words, operator_word) {
                if let Some(kind) = operator_entity(op, operand, Semantics::IntervalNotIncluded) {
                    graph.add(ids, ctx.absolute(words[i].start, words[i].end), kind);
                }
            }
        }
    }

    let number = term
        .glued
        .or_else(|| preceding_number(ctx.text(), &ctx.words(), term.start));
    if let Some((value, start, end)) = number {
        let number = graph.add(ids, ctx.absolute(start, end), EntityKind::Number { value });
        graph.connect(id, Link::Number, number);
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{run_stages, run_with};
    use chronoforge_classifier::{FeatureTemplate, FixedClassifier};
    use chronoforge_core::EntityType;

    fn types(graph: &EntityGraph) -> Vec<EntityType> {
        graph.iter().map(|e| e.entity_type()).collect()
    }

    #[test]
    fn counted_period_links_number() {
        let period = FixedClassifier::new(IntervalClass::Period);
        let (graph, _) = run_with("three weeks", &period, &[build_period_interval]);
        assert_eq!(types(&graph), vec![EntityType::Period, EntityType::Number]);
        let p = graph.iter().next().expect("period");
        assert_eq!((p.span.start, p.span.end), (6, 11));
        let n = graph.get(p.link(Link::Number).expect("number")).expect("live");
        assert_eq!(n.kind, EntityKind::Number { value: 3 });
    }

    #[test]
    fn last_week_is_interval_with_last() {
        let interval = FixedClassifier::new(IntervalClass::CalendarInterval);
        let (graph, _) = run_with("last week", &interval, &[build_period_interval]);
        assert_eq!(types(&graph), vec![EntityType::CalendarInterval, EntityType::Last]);
        let last = graph.find_last(&[EntityType::Last]).expect("last");
        assert!(matches!(&last.kind, EntityKind::Last(op) if op.semantics == Semantics::IntervalNotIncluded));
        assert_eq!((last.span.start, last.span.end), (0, 4));
    }

    #[test]
    fn this_before_period_targets_period() {
        let period = FixedClassifier::new(IntervalClass::Period);
        let (graph, _) = run_with("this month", &period, &[build_period_interval]);
        let this = graph.find_last(&[EntityType::This]).expect("this");
        let p = graph.find_last(&[EntityType::Period]).expect("period");
        assert_eq!(this.link(Link::Period), Some(p.id));
    }

    #[test]
    fn yesterday_is_last_day() {
        let (graph, _) = run_stages("yesterday", &[build_period_interval]);
        assert_eq!(types(&graph), vec![EntityType::CalendarInterval, EntityType::Last]);
    }

    #[test]
    fn daily_skips_the_classifier() {
        let period = FixedClassifier::new(IntervalClass::Period);
        let (graph, _) = run_with("twice daily", &period, &[build_period_interval]);
        assert_eq!(types(&graph), vec![EntityType::CalendarInterval]);
    }

    #[test]
    fn embedded_number() {
        let period = FixedClassifier::new(IntervalClass::Period);
        let text = "a 10-day course";
        let (graph, _) = run_with(text, &period, &[build_period_interval]);
        let p = graph.find_last(&[EntityType::Period]).expect("period");
        assert_eq!(&text[p.span.start..p.span.end], "day");
        let n = graph.get(p.link(Link::Number).expect("number")).expect("live");
        assert_eq!(&text[n.span.start..n.span.end], "10");
    }

    #[test]
    fn vague_term_is_unknown_period() {
        let (graph, _) = run_stages("soon", &[build_period_interval]);
        assert_eq!(graph.iter().next().map(|e| e.kind.clone()), Some(EntityKind::period(TimeUnit::Unknown)));
    }

    #[test]
    fn schema_mismatch_propagates() {
        // a classifier whose template the extracted vector cannot satisfy
        struct Strict(FeatureTemplate);
        impl chronoforge_classifier::PeriodIntervalClassifier for Strict {
            fn template(&self) -> &FeatureTemplate {
                &self.0
            }
            fn classify(
                &self,
                _: &chronoforge_classifier::FeatureVector,
            ) -> Result<IntervalClass, ChronoError> {
                Err(ChronoError::FeatureSchemaMismatch { expected: 1, found: 2 })
            }
        }
        let strict = Strict(FeatureTemplate::default());
        let err = crate::testing::try_run_with("two weeks", &strict, &[build_period_interval]);
        assert!(matches!(err, Err(ChronoError::FeatureSchemaMismatch { .. })));
    }
}
