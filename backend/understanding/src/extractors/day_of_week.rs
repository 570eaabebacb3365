//! Weekday names, with an operator when the phrase says this/next/last.

use chronoforge_core::{ChronoError, EntityGraph, EntityKind, IdAllocator, Operator, Semantics};
use tracing::debug;

use super::operator_entity;
use crate::context::PhraseContext;
use crate::lexicon::{is_weekday_abbreviation, operator_word, single_hit, weekday};
use crate::state::ExtractionState;

pub fn build_day_of_week(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    let words = ctx.words();
    let Some((index, day)) = single_hit(&words, weekday) else {
        return Ok(state);
    };
    let word = &words[index];
    if is_weekday_abbreviation(&word.norm) && !ctx.is_noun_at(word.start, word.end) {
        return Ok(state);
    }

    let span = ctx.absolute(word.start, word.end);
    let id = graph.add(ids, span, EntityKind::day_of_week(day));
    debug!(entity = %id, ?day, "day of week");

    if let Some((_, op)) = single_hit(&words, operator_word) {
        let operand = Operator::over_repeating(id);
        if let Some(kind) = operator_entity(op, operand, Semantics::IntervalIncluded) {
            graph.add(ids, span, kind);
        }
    }
    Ok(state)
}
