//! Uppercase time-zone abbreviations.

use chronoforge_core::text::mask_punctuation;
use chronoforge_core::{ChronoError, EntityGraph, EntityKind, IdAllocator};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::context::PhraseContext;
use crate::lexicon::TIME_ZONES;
use crate::state::ExtractionState;

// Digits may precede the zone ("1800EDT"); letters may not ("FIRST").
static ZONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?:^|[^A-Za-z])({})\b", TIME_ZONES.join("|"))).unwrap()
});

pub fn build_time_zone(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    let masked = mask_punctuation(ctx.text());
    let zones: Vec<_> = ZONE_RE.captures_iter(&masked).filter_map(|c| c.get(1)).collect();
    let Some(zone) = zones.first() else {
        return Ok(state);
    };
    if zones.iter().any(|z| z.as_str() != zone.as_str()) {
        return Ok(state);
    }
    let id = graph.add(ids, ctx.absolute(zone.start(), zone.end()), EntityKind::TimeZone {
        zone: zone.as_str().to_string(),
    });
    debug!(entity = %id, zone = zone.as_str(), "time zone");
    Ok(state)
}
