//! Parts of the day and of the week.

use chronoforge_core::{ChronoError, EntityGraph, EntityKind, IdAllocator, WeekPart};
use tracing::debug;

use crate::context::PhraseContext;
use crate::lexicon::{day_part, is_weekend, single_hit};
use crate::state::ExtractionState;

const NIGHT: &str = "night";

pub fn build_part_of_day(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    let words = ctx.words();
    if let Some((index, (part, night_suffix))) = single_hit(&words, day_part) {
        let w = &words[index];
        // spans follow the raw word, which may still hold inner punctuation
        let raw = &ctx.text()[w.start..w.end];
        let start = if night_suffix && raw.to_ascii_lowercase().ends_with(NIGHT) {
            w.end - NIGHT.len()
        } else {
            w.start
        };
        let id = graph.add(ids, ctx.absolute(start, w.end), EntityKind::part_of_day(part));
        debug!(entity = %id, ?part, "part of day");
    }
    Ok(state)
}

pub fn build_part_of_week(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    let words = ctx.words();
    if let Some((index, ())) = single_hit(&words, |w| is_weekend(w).then_some(())) {
        let w = &words[index];
        graph.add(ids, ctx.absolute(w.start, w.end), EntityKind::part_of_week(WeekPart::Weekend));
    }
    Ok(state)
}
