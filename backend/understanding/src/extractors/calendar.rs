//! Slash/dash dates and colon clock times.
//!
//! One parse feeds several stages: the year, month and day stages all read
//! the same date match, and the hour, minute and second stages the same
//! clock match. Each stage only emits its own component, so a later stage
//! for the same category never sees a second copy.

use chrono::Month;
use chronoforge_core::numbers::{month_from_name, month_from_number};
use chronoforge_core::text::is_digits;
use chronoforge_core::{ChronoError, EntityGraph, EntityKind, IdAllocator};
use once_cell::sync::Lazy;
use regex::{Captures, Match, Regex};
use tracing::debug;

use crate::context::PhraseContext;
use crate::state::ExtractionState;

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,4})([-/])(\d{1,2}|[a-z]{3,9})([-/])(\d{1,4})\b").unwrap()
});

static CIRCA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bc\.\s?(\d{4})\b").unwrap());

static CLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2}):(\d{2})(?::(\d{2}))?(?:[ap]\.?m\.?)?$").unwrap()
});

/// Lone 4-digit tokens inside this range are years, not clock times.
pub const LONE_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1500..=2050;

/// A numeric component and its phrase-local byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Part {
    pub value: u32,
    pub start: usize,
    pub end: usize,
}

impl Part {
    fn parse(m: Match<'_>) -> Option<Self> {
        Some(Self { value: m.as_str().parse().ok()?, start: m.start(), end: m.end() })
    }

    fn shifted(self, offset: usize) -> Self {
        Self { start: self.start + offset, end: self.end + offset, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateMatch {
    pub year: Part,
    pub year_digits: usize,
    pub month: Option<(Month, Part)>,
    pub day: Option<Part>,
}

fn month_part(m: Match<'_>) -> Option<(Month, Part)> {
    if is_digits(m.as_str()) {
        let part = Part::parse(m)?;
        return Some((month_from_number(part.value)?, part));
    }
    let month = month_from_name(m.as_str())?;
    Some((month, Part { value: month.number_from_month(), start: m.start(), end: m.end() }))
}

fn classify(caps: &Captures<'_>) -> Option<DateMatch> {
    if caps[2] != caps[4] {
        return None;
    }
    let (first, middle, last) = (caps.get(1)?, caps.get(3)?, caps.get(5)?);
    let textual = !is_digits(middle.as_str());
    let leading = Part::parse(first)?;

    // (year, year digits, month, day)
    let (year, digits, month, day) = match (first.len(), last.len()) {
        (4, 1 | 2) if !textual => (first, 4, middle, last),
        (1 | 2, 4) if textual || leading.value > 12 => (last, 4, middle, first),
        (1 | 2, 4) => (last, 4, first, middle),
        (1 | 2, 2) if textual => (last, 2, middle, first),
        // mm/dd/yy when the first group can be a month, yy/mm/dd otherwise
        (1 | 2, 2) if leading.value <= 12 => (last, 2, first, middle),
        (1 | 2, 2) => (first, 2, middle, last),
        _ => return None,
    };

    Some(DateMatch {
        year: Part::parse(year)?,
        year_digits: digits,
        month: month_part(month),
        day: Part::parse(day).filter(|d| (1..=31).contains(&d.value)),
    })
}

/// First slash or dash date in `text`.
pub(crate) fn parse_date(text: &str) -> Option<DateMatch> {
    DATE_RE.captures_iter(text).find_map(|caps| classify(&caps))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClockMatch {
    pub hour: Part,
    pub minute: Part,
    pub second: Option<Part>,
}

/// Whether a single word is a clock time.
pub(crate) fn is_clock(word: &str) -> bool {
    CLOCK_RE.is_match(word)
}

/// First `h:mm` or `h:mm:ss` word in `ctx`.
pub(crate) fn parse_clock(ctx: &PhraseContext<'_>) -> Option<ClockMatch> {
    let text = ctx.text();
    ctx.words().into_iter().find_map(|w| {
        let caps = CLOCK_RE.captures(&text[w.start..w.end])?;
        let hour = Part::parse(caps.get(1)?)?.shifted(w.start);
        let minute = Part::parse(caps.get(2)?)?.shifted(w.start);
        let second = match caps.get(3) {
            Some(m) => Some(Part::parse(m)?.shifted(w.start)),
            None => None,
        };
        let valid = hour.value <= 24
            && minute.value < 60
            && second.map_or(true, |s| s.value < 60);
        valid.then_some(ClockMatch { hour, minute, second })
    })
}

fn add_part(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    part: Part,
    kind: EntityKind,
) {
    let id = graph.add(ids, ctx.absolute(part.start, part.end), kind);
    debug!(entity = %id, text = &ctx.text()[part.start..part.end], "calendar component");
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Four-digit year from a date, a `c.yyyy` form, or a lone year token.
pub fn build_year(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    if state.four_digit_year {
        return Ok(state);
    }
    let text = ctx.text();

    if let Some(date) = parse_date(text).filter(|d| d.year_digits == 4) {
        add_part(ctx, graph, ids, date.year, EntityKind::year(date.year.value as i32));
        return Ok(state.with_year(false));
    }

    if let Some(year) = CIRCA_RE.captures(text).and_then(|c| c.get(1)).and_then(Part::parse) {
        add_part(ctx, graph, ids, year, EntityKind::year(year.value as i32));
        return Ok(state.with_year(false));
    }

    for w in ctx.words() {
        let core = &text[w.start..w.end];
        if core.len() != 4 || !is_digits(core) {
            continue;
        }
        let Ok(value) = core.parse::<i32>() else {
            continue;
        };
        if LONE_YEAR_RANGE.contains(&value) {
            let part = Part { value: value as u32, start: w.start, end: w.end };
            add_part(ctx, graph, ids, part, EntityKind::year(value));
            return Ok(state.with_year(true));
        }
    }
    Ok(state)
}

pub fn build_two_digit_year(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    if state.four_digit_year {
        return Ok(state);
    }
    if let Some(date) = parse_date(ctx.text()).filter(|d| d.year_digits == 2) {
        add_part(ctx, graph, ids, date.year, EntityKind::two_digit_year(date.year.value));
    }
    Ok(state)
}

pub fn build_month(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    if state.month {
        return Ok(state);
    }
    match parse_date(ctx.text()).and_then(|d| d.month) {
        Some((month, part)) => {
            add_part(ctx, graph, ids, part, EntityKind::month(month));
            Ok(state.with_month())
        }
        None => Ok(state),
    }
}

pub fn build_day(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    if state.day {
        return Ok(state);
    }
    match parse_date(ctx.text()).and_then(|d| d.day) {
        Some(day) => {
            add_part(ctx, graph, ids, day, EntityKind::day_of_month(day.value));
            Ok(state.with_day())
        }
        None => Ok(state),
    }
}

pub fn build_hour(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    if state.hour {
        return Ok(state);
    }
    match parse_clock(ctx) {
        Some(clock) => {
            add_part(ctx, graph, ids, clock.hour, EntityKind::hour(clock.hour.value));
            Ok(state.with_hour())
        }
        None => Ok(state),
    }
}

pub fn build_minute(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    if state.minute {
        return Ok(state);
    }
    match parse_clock(ctx) {
        Some(clock) => {
            add_part(ctx, graph, ids, clock.minute, EntityKind::minute(clock.minute.value));
            Ok(state.with_minute())
        }
        None => Ok(state),
    }
}

pub fn build_second(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    if state.second {
        return Ok(state);
    }
    match parse_clock(ctx).and_then(|c| c.second) {
        Some(second) => {
            add_part(ctx, graph, ids, second, EntityKind::second(second.value));
            Ok(state.with_second())
        }
        None => Ok(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run_stages;
    use chronoforge_core::EntityType;

    fn date(text: &str) -> (u32, usize, Option<u32>, Option<u32>) {
        let d = parse_date(text).expect("date");
        (d.year.value, d.year_digits, d.month.map(|m| m.1.value), d.day.map(|d| d.value))
    }

    #[test]
    fn month_first_when_leading_group_fits() {
        assert_eq!(date("11/02/89"), (89, 2, Some(11), Some(2)));
        assert_eq!(date("on 05-16-1998,"), (1998, 4, Some(5), Some(16)));
    }

    #[test]
    fn year_first_and_day_first_forms() {
        assert_eq!(date("1998-05-16"), (1998, 4, Some(5), Some(16)));
        assert_eq!(date("89/11/02"), (89, 2, Some(11), Some(2)));
        assert_eq!(date("25/12/2001"), (2001, 4, Some(12), Some(25)));
        assert_eq!(date("02-Nov-89"), (89, 2, Some(11), Some(2)));
    }

    #[test]
    fn mixed_separators_and_colons_are_not_dates() {
        assert!(parse_date("11/02-89").is_none());
        assert!(parse_date("11:02:59").is_none());
        assert!(parse_date("1/2/3").is_none());
    }

    #[test]
    fn date_stages_share_one_match() {
        let (graph, state) = run_stages("11/02/1989", &[build_year, build_month, build_day]);
        let types: Vec<_> = graph.iter().map(|e| e.entity_type()).collect();
        assert_eq!(types, vec![EntityType::Year, EntityType::MonthOfYear, EntityType::DayOfMonth]);
        assert!(state.four_digit_year && state.month && state.day);
        assert!(!state.lone_digit_year);
    }

    #[test]
    fn lone_year_sets_both_flags() {
        let (graph, state) = run_stages("in 1998", &[build_year, build_two_digit_year]);
        let year = graph.iter().next().expect("year");
        assert_eq!(year.kind, EntityKind::year(1998));
        assert_eq!((year.span.start, year.span.end), (3, 7));
        assert!(state.lone_digit_year && state.four_digit_year);
    }

    #[test]
    fn out_of_range_four_digits_are_not_years() {
        let (graph, state) = run_stages("at 1430", &[build_year]);
        assert!(graph.is_empty());
        assert_eq!(state, ExtractionState::default());
    }

    #[test]
    fn circa_year() {
        let (graph, _) = run_stages("c.1850", &[build_year]);
        assert_eq!(graph.iter().next().map(|e| e.kind.clone()), Some(EntityKind::year(1850)));
    }

    #[test]
    fn clock_components() {
        let (graph, state) = run_stages("12:30:45", &[build_hour, build_minute, build_second]);
        let values: Vec<_> = graph
            .iter()
            .map(|e| (e.entity_type(), e.span.start, e.span.end))
            .collect();
        assert_eq!(
            values,
            vec![
                (EntityType::HourOfDay, 0, 2),
                (EntityType::MinuteOfHour, 3, 5),
                (EntityType::SecondOfMinute, 6, 8),
            ]
        );
        assert!(state.hour && state.minute && state.second);
    }

    #[test]
    fn clock_rejects_out_of_range() {
        let (graph, _) = run_stages("26:10", &[build_hour, build_minute]);
        assert!(graph.is_empty());
        let (graph, _) = run_stages("at 10:30am", &[build_hour]);
        assert_eq!(graph.iter().next().map(|e| e.kind.clone()), Some(EntityKind::hour(10)));
    }
}
