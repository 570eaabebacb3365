//! Before/After operators from words like "ago" and "later".

use chronoforge_core::{ChronoError, EntityGraph, EntityKind, IdAllocator, IntervalType, Operator};

use crate::context::PhraseContext;
use crate::lexicon::{Direction, direction, single_hit};
use crate::state::ExtractionState;

pub fn build_before_after(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    let words = ctx.words();
    let Some((index, dir)) = single_hit(&words, direction) else {
        return Ok(state);
    };
    let op = Operator::default().with_interval_type(IntervalType::Link);
    let kind = match dir {
        Direction::Before => EntityKind::Before(op),
        Direction::After => EntityKind::After(op),
    };
    let w = &words[index];
    graph.add(ids, ctx.absolute(w.start, w.end), kind);
    Ok(state)
}
