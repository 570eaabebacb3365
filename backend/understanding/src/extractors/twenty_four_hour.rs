//! Military `HHMM` times, optionally glued to a zone abbreviation ("1800EDT").

use chronoforge_core::{ChronoError, EntityGraph, EntityKind, IdAllocator, Link};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::context::PhraseContext;
use crate::lexicon::TIME_ZONES;
use crate::state::ExtractionState;

static HHMM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{2})(\d{2})([A-Z]{3,4})?$").unwrap());

/// `(hour, minute, word start)` of the first `HHMM` word.
fn find(ctx: &PhraseContext<'_>) -> Option<(u32, u32, usize)> {
    let text = ctx.text();
    ctx.words().into_iter().find_map(|w| {
        let caps = HHMM_RE.captures(&text[w.start..w.end])?;
        if let Some(zone) = caps.get(3) {
            if !TIME_ZONES.contains(&zone.as_str()) {
                return None;
            }
        }
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        (hour <= 24 && minute < 60).then_some((hour, minute, w.start))
    })
}

/// Hour and minute from an `HHMM` word, the hour pointing at the minute.
///
/// A word already taken as a lone year is never reread as a time.
pub fn build_twenty_four_hour(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    if state.lone_digit_year || state.hour || state.minute {
        return Ok(state);
    }
    let Some((hour, minute, start)) = find(ctx) else {
        return Ok(state);
    };
    let minute_id = graph.add(ids, ctx.absolute(start + 2, start + 4), EntityKind::minute(minute));
    let hour_id = graph.add(ids, ctx.absolute(start, start + 2), EntityKind::hour(hour));
    graph.connect(hour_id, Link::SubInterval, minute_id);
    debug!(hour, minute, "24-hour time");
    Ok(state.with_hour().with_minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::calendar::build_year;
    use crate::testing::run_stages;

    #[test]
    fn reads_hhmm() {
        let (graph, state) = run_stages("at 0930", &[build_twenty_four_hour]);
        let all: Vec<_> = graph.iter().collect();
        assert_eq!(all[0].kind, EntityKind::minute(30));
        assert_eq!(all[1].link(Link::SubInterval), Some(all[0].id));
        assert_eq!((all[1].span.start, all[1].span.end), (3, 5));
        assert!(state.hour && state.minute);
    }

    #[test]
    fn glued_zone_is_accepted() {
        let (graph, _) = run_stages("1800EDT", &[build_twenty_four_hour]);
        assert_eq!(graph.len(), 2);
        let (graph, _) = run_stages("1800ABC", &[build_twenty_four_hour]);
        assert!(graph.is_empty());
    }

    #[test]
    fn lone_year_blocks_time_reading() {
        let (graph, _) = run_stages("1998", &[build_year, build_twenty_four_hour]);
        assert_eq!(graph.len(), 1);
        let (graph, _) = run_stages("2575", &[build_twenty_four_hour]);
        assert!(graph.is_empty());
    }
}
