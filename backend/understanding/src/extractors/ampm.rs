//! AM/PM markers, and the hour they qualify when no clock time was found.

use chronoforge_core::text::is_digits;
use chronoforge_core::{AmPm, ChronoError, EntityGraph, EntityKind, IdAllocator};
use tracing::debug;

use crate::context::PhraseContext;
use crate::lexicon::{AMPM_RE, preceding_number};
use crate::state::ExtractionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Marker {
    ampm: AmPm,
    start: usize,
    end: usize,
    /// Digits glued to the marker ("5pm", "530pm").
    glued: Option<(usize, usize)>,
}

fn find_marker(ctx: &PhraseContext<'_>) -> Option<Marker> {
    let text = ctx.text();
    let mut found: Option<(String, Marker)> = None;
    for w in ctx.words() {
        let Some(caps) = AMPM_RE.captures(&text[w.start..w.end]) else {
            continue;
        };
        let Some(m) = caps.get(2) else {
            continue;
        };
        let ampm = if m.as_str().to_ascii_lowercase().starts_with('a') { AmPm::Am } else { AmPm::Pm };
        let start = w.start + m.start();
        let end = if start + m.len() == w.end { w.end_with_dot(text) } else { start + m.len() };
        let glued = caps.get(1).map(|g| (w.start + g.start(), w.start + g.end()));
        let marker = Marker { ampm, start, end, glued };
        match &found {
            None => found = Some((w.norm.clone(), marker)),
            Some((norm, _)) if *norm == w.norm => {}
            Some(_) => return None,
        }
    }
    found.map(|(_, marker)| marker)
}

/// `(value, start, end)` of an hour and an optional minute.
type HourMinute = ((u32, usize, usize), Option<(u32, usize, usize)>);

/// Hour and optional minute read from digits like "5", "11" or "530".
fn split_digits(digits: &str, start: usize) -> Option<HourMinute> {
    match digits.len() {
        1 | 2 => Some(((digits.parse().ok()?, start, start + digits.len()), None)),
        3 | 4 => {
            let cut = digits.len() - 2;
            let hour = (digits[..cut].parse().ok()?, start, start + cut);
            let minute = (digits[cut..].parse().ok()?, start + cut, start + digits.len());
            Some((hour, Some(minute)))
        }
        _ => None,
    }
}

fn recover_hour(ctx: &PhraseContext<'_>, marker: &Marker) -> Option<HourMinute> {
    let text = ctx.text();
    let parsed = match marker.glued {
        Some((start, end)) => {
            let digits = &text[start..end];
            if !is_digits(digits) {
                return None;
            }
            split_digits(digits, start)?
        }
        None => {
            let (value, start, end) = preceding_number(text, &ctx.words(), marker.start)?;
            let covered = &text[start..end];
            if is_digits(covered) {
                split_digits(covered, start)?
            } else {
                ((u32::try_from(value).ok()?, start, end), None)
            }
        }
    };
    let ((hour, _, _), minute) = parsed;
    let valid = (1..=12).contains(&hour) && minute.map_or(true, |(m, _, _)| m < 60);
    valid.then_some(parsed)
}

/// AM/PM entity, plus an hour (and minute) read from the number before it.
///
/// Requires exactly one marker in the phrase. The marker stays unattached
/// here; linking points the hour at it or drops it.
pub fn build_ampm(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    let Some(marker) = find_marker(ctx) else {
        return Ok(state);
    };
    let id = graph.add(ids, ctx.absolute(marker.start, marker.end), EntityKind::AmPmOfDay {
        ampm: marker.ampm,
    });
    debug!(entity = %id, ampm = marker.ampm.as_str(), "am/pm marker");

    if state.hour {
        return Ok(state);
    }
    let Some(((hour, start, end), minute)) = recover_hour(ctx, &marker) else {
        return Ok(state);
    };
    graph.add(ids, ctx.absolute(start, end), EntityKind::hour(hour));
    let mut state = state.with_hour();
    if let Some((value, start, end)) = minute.filter(|_| !state.minute) {
        graph.add(ids, ctx.absolute(start, end), EntityKind::minute(value));
        state = state.with_minute();
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::calendar::build_hour;
    use crate::testing::run_stages;
    use chronoforge_core::EntityType;

    fn summary(text: &str) -> Vec<(EntityType, usize, usize)> {
        let (graph, _) = run_stages(text, &[build_hour, build_ampm]);
        graph.iter().map(|e| (e.entity_type(), e.span.start, e.span.end)).collect()
    }

    #[test]
    fn spaced_marker_takes_previous_digit() {
        assert_eq!(
            summary("5 p.m. EST"),
            vec![(EntityType::AmPmOfDay, 2, 6), (EntityType::HourOfDay, 0, 1)]
        );
    }

    #[test]
    fn glued_digits_split_into_hour_and_minute() {
        assert_eq!(
            summary("530pm"),
            vec![
                (EntityType::AmPmOfDay, 3, 5),
                (EntityType::HourOfDay, 0, 1),
                (EntityType::MinuteOfHour, 1, 3),
            ]
        );
    }

    #[test]
    fn spelled_hour() {
        let (graph, _) = run_stages("at five am", &[build_ampm]);
        assert!(graph.iter().any(|e| e.kind == EntityKind::hour(5)));
    }

    #[test]
    fn existing_clock_hour_is_not_duplicated() {
        let hours = summary("10:30 am")
            .into_iter()
            .filter(|(t, _, _)| *t == EntityType::HourOfDay)
            .count();
        assert_eq!(hours, 1);
    }

    #[test]
    fn marker_without_number_stands_alone() {
        assert_eq!(summary("p.m."), vec![(EntityType::AmPmOfDay, 0, 4)]);
        assert_eq!(summary("14 pm"), vec![(EntityType::AmPmOfDay, 3, 5)]);
    }

    #[test]
    fn two_markers_abstain() {
        assert!(summary("9 am to 5 pm").is_empty());
    }
}
