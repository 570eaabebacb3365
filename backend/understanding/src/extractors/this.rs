//! Deictic "now", "today" and "current".

use chronoforge_core::{ChronoError, EntityGraph, EntityKind, IdAllocator, Operator, TimeUnit};
use tracing::debug;

use crate::context::PhraseContext;
use crate::state::ExtractionState;

/// This operators for "now" and "current"; "today" also gets a Day interval
/// for the operator to repeat over.
pub fn build_this(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    let mut seen: Vec<String> = Vec::new();
    for w in ctx.words() {
        if seen.contains(&w.norm) {
            continue;
        }
        let span = ctx.absolute(w.start, w.end);
        match w.norm.as_str() {
            "now" | "current" => {
                graph.add(ids, span, EntityKind::This(Operator::default()));
            }
            "today" | "todays" => {
                let existing = graph
                    .iter()
                    .find(|e| {
                        e.span == span
                            && matches!(e.kind, EntityKind::CalendarInterval { unit: TimeUnit::Day, .. })
                    })
                    .map(|e| e.id);
                let day = match existing {
                    Some(id) => id,
                    None => graph.add(ids, span, EntityKind::calendar_interval(TimeUnit::Day)),
                };
                graph.add(ids, span, EntityKind::This(Operator::over_repeating(day)));
            }
            _ => continue,
        }
        debug!(word = %w.norm, "this");
        seen.push(w.norm.clone());
    }
    Ok(state)
}
