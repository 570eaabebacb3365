//! Ordinals next to a temporal token ("the third week").

use chronoforge_core::numbers::ordinal_value;
use chronoforge_core::{ChronoError, EntityGraph, EntityKind, IdAllocator};

use crate::context::PhraseContext;
use crate::state::ExtractionState;

pub fn build_nth(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    let text = ctx.text();
    for w in ctx.words() {
        let Some(value) = ordinal_value(&text[w.start..w.end]) else {
            continue;
        };
        let Some(index) = ctx.token_index(w.start, w.end) else {
            continue;
        };
        let neighbour_temporal = index
            .checked_sub(1)
            .into_iter()
            .chain([index + 1])
            .filter_map(|i| ctx.tokens.get(i))
            .any(|t| t.temporal);
        if neighbour_temporal {
            graph.add(ids, ctx.absolute(w.start, w.end), EntityKind::nth(value));
            break;
        }
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run_stages;

    #[test]
    fn ordinal_before_temporal_word() {
        let (graph, _) = run_stages("the third week", &[build_nth]);
        let e = graph.iter().next().expect("nth");
        assert_eq!(e.kind, EntityKind::nth(3));
        assert_eq!((e.span.start, e.span.end), (4, 9));
    }

    #[test]
    fn ordinal_without_temporal_neighbour() {
        let (graph, _) = run_stages("the third patient", &[build_nth]);
        assert!(graph.is_empty());
    }
}
