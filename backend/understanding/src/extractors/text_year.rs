//! Years written out in words ("nineteen ninety eight").

use chronoforge_core::numbers::words_to_number;
use chronoforge_core::{ChronoError, EntityGraph, EntityKind, IdAllocator};

use super::calendar::LONE_YEAR_RANGE;
use crate::context::PhraseContext;
use crate::state::ExtractionState;

/// The whole phrase must spell a year; anything else in it disqualifies.
pub fn build_text_year(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    if state.four_digit_year {
        return Ok(state);
    }
    let text = ctx.text();
    let trim = |c: char| c.is_whitespace() || c == ',' || c == '.';
    let core = text.trim_matches(trim);
    let spelled = core.chars().all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '-');
    if core.is_empty() || !spelled {
        return Ok(state);
    }
    let Some(year) = words_to_number(core).and_then(|v| i32::try_from(v).ok()) else {
        return Ok(state);
    };
    if !LONE_YEAR_RANGE.contains(&year) {
        return Ok(state);
    }
    let start = text.len() - text.trim_start_matches(trim).len();
    graph.add(ids, ctx.absolute(start, start + core.len()), EntityKind::year(year));
    Ok(state.with_year(false))
}
