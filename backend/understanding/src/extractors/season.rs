//! Seasons of the year, with an operator and a preceding count.

use chronoforge_core::{
    ChronoError, EntityGraph, EntityKind, IdAllocator, Link, Operator, Semantics,
};
use tracing::debug;

use super::operator_entity;
use crate::context::PhraseContext;
use crate::lexicon::{operator_word, preceding_number, season, single_hit};
use crate::state::ExtractionState;

/// Season entity when the season word is tagged as a noun ("fall" the verb
/// is not a season).
pub fn build_season(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    let words = ctx.words();
    let Some((index, found)) = single_hit(&words, season) else {
        return Ok(state);
    };
    let word = &words[index];
    if !ctx.is_noun_at(word.start, word.end) {
        return Ok(state);
    }
    let span = ctx.absolute(word.start, word.end);
    let id = graph.add(ids, span, EntityKind::season(found));
    debug!(entity = %id, season = ?found, "season");

    if let Some((_, op)) = single_hit(&words, operator_word) {
        if let Some(kind) =
            operator_entity(op, Operator::over_repeating(id), Semantics::IntervalNotIncluded)
        {
            graph.add(ids, span, kind);
        }
    }

    if let Some((value, start, end)) = preceding_number(ctx.text(), &words, word.start) {
        let number = graph.add(ids, ctx.absolute(start, end), EntityKind::Number { value });
        graph.connect(id, Link::Number, number);
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{run_stages, run_tagged};
    use chronoforge_core::{EntityType, Season};

    #[test]
    fn counted_seasons_link_their_number() {
        let (graph, _) = run_stages("two summers", &[build_season]);
        let s = graph.find_last(&[EntityType::SeasonOfYear]).expect("season");
        assert!(matches!(s.kind, EntityKind::SeasonOfYear { season: Season::Summer, .. }));
        let n = graph.get(s.link(Link::Number).expect("number")).expect("live");
        assert_eq!(n.kind, EntityKind::Number { value: 2 });
    }

    #[test]
    fn verb_fall_is_skipped() {
        let (graph, _) = run_tagged("prices fall", &["NNS", "VBP"], &[build_season]);
        assert!(graph.is_empty());
    }

    #[test]
    fn next_spring_has_operator() {
        let (graph, _) = run_stages("next spring", &[build_season]);
        assert!(graph.contains_type(EntityType::Next));
    }
}
