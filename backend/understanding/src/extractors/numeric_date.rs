//! Condensed all-digit dates: `yyyymmdd`, `mmddyyyy`, `mmddyy`, `yymmdd`.

use chronoforge_core::numbers::month_from_number;
use chronoforge_core::text::is_digits;
use chronoforge_core::{ChronoError, EntityGraph, EntityKind, IdAllocator, Link};
use tracing::debug;

use super::calendar::LONE_YEAR_RANGE;
use crate::context::PhraseContext;
use crate::state::ExtractionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Condensed {
    year: (u32, usize, usize),
    four_digit: bool,
    month: (u32, usize, usize),
    day: (u32, usize, usize),
}

fn field(digits: &str, start: usize, end: usize) -> Option<(u32, usize, usize)> {
    Some((digits.get(start..end)?.parse().ok()?, start, end))
}

fn plausible(month: (u32, usize, usize), day: (u32, usize, usize)) -> bool {
    month_from_number(month.0).is_some() && (1..=31).contains(&day.0)
}

/// Split a digit string; offsets are relative to the string.
fn split(digits: &str) -> Option<Condensed> {
    match digits.len() {
        8 => {
            let year = field(digits, 0, 4)?;
            let (month, day) = (field(digits, 4, 6)?, field(digits, 6, 8)?);
            if LONE_YEAR_RANGE.contains(&(year.0 as i32)) && plausible(month, day) {
                return Some(Condensed { year, four_digit: true, month, day });
            }
            let (month, day) = (field(digits, 0, 2)?, field(digits, 2, 4)?);
            let year = field(digits, 4, 8)?;
            plausible(month, day).then_some(Condensed { year, four_digit: true, month, day })
        }
        6 => {
            let (month, day) = (field(digits, 0, 2)?, field(digits, 2, 4)?);
            if plausible(month, day) {
                let year = field(digits, 4, 6)?;
                return Some(Condensed { year, four_digit: false, month, day });
            }
            let year = field(digits, 0, 2)?;
            let (month, day) = (field(digits, 2, 4)?, field(digits, 4, 6)?);
            plausible(month, day).then_some(Condensed { year, four_digit: false, month, day })
        }
        _ => None,
    }
}

/// Year, month and day from one condensed token, chained year to day.
pub fn build_numeric_date(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    if state.lone_digit_year || state.four_digit_year || state.month || state.day {
        return Ok(state);
    }
    let text = ctx.text();
    let found = ctx.words().into_iter().find_map(|w| {
        let core = &text[w.start..w.end];
        is_digits(core).then(|| split(core)).flatten().map(|c| (w.start, c))
    });
    let Some((offset, date)) = found else {
        return Ok(state);
    };
    let Some(month) = month_from_number(date.month.0) else {
        return Ok(state);
    };

    let span = |(_, start, end): (u32, usize, usize)| ctx.absolute(offset + start, offset + end);
    let year_kind = if date.four_digit {
        EntityKind::year(date.year.0 as i32)
    } else {
        EntityKind::two_digit_year(date.year.0)
    };
    let year = graph.add(ids, span(date.year), year_kind);
    let month_id = graph.add(ids, span(date.month), EntityKind::month(month));
    let day = graph.add(ids, span(date.day), EntityKind::day_of_month(date.day.0));
    graph.connect(year, Link::SubInterval, month_id);
    graph.connect(month_id, Link::SubInterval, day);
    debug!(year = %year, month = %month_id, day = %day, "condensed date");

    let state = if date.four_digit { state.with_year(false) } else { state };
    Ok(state.with_month().with_day())
}
