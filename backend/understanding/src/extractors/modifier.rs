//! Approximation and boundary modifiers ("about", "early", "mid-").

use chronoforge_core::{ChronoError, EntityGraph, EntityKind, IdAllocator, ModifierKind};
use tracing::debug;

use crate::context::PhraseContext;
use crate::lexicon::modifier_kind;
use crate::state::ExtractionState;

/// `(kind, head, start, end)` for the one modifier word in the phrase.
///
/// Hyphenated forms ("mid-1990s") annotate the part before the hyphen, and a
/// `<` glued to a number counts on its own.
fn find(ctx: &PhraseContext<'_>) -> Option<(ModifierKind, usize, usize)> {
    let text = ctx.text();
    let mut found: Option<(String, ModifierKind, usize, usize)> = None;
    for w in ctx.words() {
        let hit = if w.norm == "<" || text[..w.start].ends_with('<') {
            let start = if w.norm == "<" { w.start } else { w.start - 1 };
            Some(("<".to_string(), ModifierKind::LessThan, start, start + 1))
        } else {
            let head = text[w.start..w.end].split('-').next().unwrap_or_default();
            let lowered = head.to_lowercase();
            modifier_kind(&lowered).map(|kind| (lowered, kind, w.start, w.start + head.len()))
        };
        let Some(hit) = hit else {
            continue;
        };
        match &found {
            None => found = Some(hit),
            Some((head, ..)) if *head == hit.0 => {}
            Some(_) => return None,
        }
    }
    found.map(|(_, kind, start, end)| (kind, start, end))
}

/// Free-standing modifier entity. Linking attaches it to a period or
/// calendar interval, or drops it.
pub fn build_modifier(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    if let Some((kind, start, end)) = find(ctx) {
        let id = graph.add(ids, ctx.absolute(start, end), EntityKind::Modifier { kind });
        debug!(entity = %id, modifier = kind.as_str(), "modifier");
    }
    Ok(state)
}
