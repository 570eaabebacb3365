//! Sub-interval linking for one phrase.
//!
//! Runs once after every extraction stage. It wires the calendar chain,
//! attaches dependents (AM/PM, zone, modifier, nth) to their anchors, drops
//! what has no anchor, and resolves a year-less month or weekday against the
//! document creation time.

use chrono::{Datelike, NaiveDateTime};
use chronoforge_core::{
    EntityGraph, EntityId, EntityKind, EntityType, IdAllocator, Link, Operator, ReferenceToken,
    Span, token_index_at,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Policy switches for the linker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOptions {
    /// Delete Nth entities that found neither a period nor an interval.
    #[serde(default)]
    pub drop_unanchored_nth: bool,
}

/// Last live entity per category.
#[derive(Debug, Default)]
struct Anchors {
    year: Option<EntityId>,
    month: Option<EntityId>,
    day: Option<EntityId>,
    day_of_week: Option<EntityId>,
    hour: Option<EntityId>,
    minute: Option<EntityId>,
    second: Option<EntityId>,
    part_of_day: Option<EntityId>,
    period: Option<EntityId>,
    interval: Option<EntityId>,
    /// Any This/Next/Last already present.
    operator: bool,
}

impl Anchors {
    fn scan(graph: &EntityGraph) -> Self {
        let mut a = Self::default();
        for e in graph.iter() {
            let id = Some(e.id);
            match e.entity_type() {
                EntityType::Year | EntityType::TwoDigitYear => a.year = id,
                EntityType::MonthOfYear => a.month = id,
                EntityType::DayOfMonth => a.day = id,
                EntityType::DayOfWeek => a.day_of_week = id,
                EntityType::HourOfDay => a.hour = id,
                EntityType::MinuteOfHour => a.minute = id,
                EntityType::SecondOfMinute => a.second = id,
                EntityType::PartOfDay => a.part_of_day = id,
                EntityType::Period => a.period = id,
                EntityType::CalendarInterval => a.interval = id,
                EntityType::This | EntityType::Next | EntityType::Last => a.operator = true,
                _ => {}
            }
        }
        a
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relative {
    Last,
    Next,
}

impl Relative {
    fn operator(self, target: EntityId) -> EntityKind {
        match self {
            Self::Last => EntityKind::Last(Operator::over_repeating(target)),
            Self::Next => EntityKind::Next(Operator::over_repeating(target)),
        }
    }
}

fn ids_of(graph: &EntityGraph, ty: EntityType) -> Vec<EntityId> {
    graph.iter().filter(|e| e.entity_type() == ty).map(|e| e.id).collect()
}

fn chain(graph: &mut EntityGraph, parent: Option<EntityId>, child: Option<EntityId>) {
    if let (Some(parent), Some(child)) = (parent, child) {
        graph.connect(parent, Link::SubInterval, child);
    }
}

/// Point `anchor`'s `link` at the last dependent of `ty`; delete the rest.
fn attach_or_drop(graph: &mut EntityGraph, ty: EntityType, anchor: Option<(EntityId, Link)>) {
    let mut dependents = ids_of(graph, ty);
    let chosen = match anchor {
        Some(_) => dependents.pop(),
        None => None,
    };
    if let (Some((anchor, link)), Some(dependent)) = (anchor, chosen) {
        graph.connect(anchor, link, dependent);
    }
    for orphan in dependents {
        debug!(entity = %orphan, kind = ty.as_str(), "dropping orphan");
        graph.delete(orphan);
    }
}

/// Month position relative to the document month; the day breaks a tie.
fn month_relative(month: u32, day: Option<u32>, doc_time: &NaiveDateTime) -> Option<Relative> {
    match (month.cmp(&doc_time.month()), day) {
        (std::cmp::Ordering::Equal, Some(day)) if day <= doc_time.day() => Some(Relative::Last),
        (std::cmp::Ordering::Equal, Some(_)) => Some(Relative::Next),
        (std::cmp::Ordering::Less, _) => Some(Relative::Last),
        (std::cmp::Ordering::Greater, _) => Some(Relative::Next),
        (std::cmp::Ordering::Equal, None) => None,
    }
}

/// Tense of the nearest verb at or before the weekday's token, within its
/// sentence.
fn verb_tense(tokens: &[ReferenceToken], span: Span) -> Option<Relative> {
    let index = token_index_at(tokens, span)?;
    let sentence = tokens[index].sentence;
    tokens[..=index]
        .iter()
        .rev()
        .take_while(|t| t.sentence == sentence)
        .find(|t| t.pos().starts_with("VB"))
        .and_then(|t| match t.pos() {
            "VBD" | "VBN" => Some(Relative::Last),
            "VB" | "VBG" | "VBP" | "VBZ" => Some(Relative::Next),
            _ => None,
        })
}

fn resolve_against_doc_time(
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    anchors: &Anchors,
    doc_time: &NaiveDateTime,
    tokens: &[ReferenceToken],
) {
    if anchors.year.is_some() || anchors.operator {
        return;
    }

    let month = anchors.month.and_then(|id| graph.get(id)).and_then(|e| match e.kind {
        EntityKind::MonthOfYear { month, .. } => Some((e.id, e.span, month.number_from_month())),
        _ => None,
    });
    if let Some((id, span, month)) = month {
        let day = anchors.day.and_then(|id| graph.get(id)).and_then(|e| match e.kind {
            EntityKind::DayOfMonth { value, .. } => Some(value),
            _ => None,
        });
        if let Some(relative) = month_relative(month, day, doc_time) {
            let op = graph.add(ids, span, relative.operator(id));
            debug!(entity = %op, ?relative, "month resolved against document time");
        }
    }

    let weekday = anchors.day_of_week.and_then(|id| graph.get(id)).map(|e| (e.id, e.span));
    if let Some((id, span)) = weekday {
        if let Some(relative) = verb_tense(tokens, span) {
            let op = graph.add(ids, span, relative.operator(id));
            debug!(entity = %op, ?relative, "weekday resolved from verb tense");
        }
    }
}

/// Link the entities of one phrase in place.
///
/// New operators draw their IDs from `ids`; deleted entities keep theirs
/// reserved.
pub fn link(
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    doc_time: Option<NaiveDateTime>,
    tokens: &[ReferenceToken],
    options: &LinkOptions,
) {
    let a = Anchors::scan(graph);

    if let Some(doc_time) = doc_time.as_ref() {
        resolve_against_doc_time(graph, ids, &a, doc_time, tokens);
    }

    chain(graph, a.minute, a.second);
    chain(graph, a.hour, a.minute);
    chain(graph, a.day, a.hour);
    chain(graph, a.month, a.day);
    chain(graph, a.year, a.month);
    chain(graph, a.day_of_week, a.hour);
    if a.hour.is_none() {
        chain(graph, a.day_of_week, a.part_of_day);
        chain(graph, a.day, a.part_of_day);
    }

    let on_hour = |link| a.hour.map(|hour| (hour, link));
    attach_or_drop(graph, EntityType::TimeZone, on_hour(Link::TimeZone));
    attach_or_drop(graph, EntityType::AmPmOfDay, on_hour(Link::AmPm));

    let target = a.period.or(a.interval).map(|id| (id, Link::Modifier));
    attach_or_drop(graph, EntityType::Modifier, target);

    for nth in ids_of(graph, EntityType::Nth) {
        let linked = match (a.period, a.interval) {
            (Some(period), _) => graph.connect(nth, Link::Period, period),
            (None, Some(interval)) => graph.connect(nth, Link::RepeatingInterval, interval),
            (None, None) => false,
        };
        if !linked && options.drop_unanchored_nth {
            debug!(entity = %nth, "dropping unanchored nth");
            graph.delete(nth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, NaiveDate, Weekday};
    use chronoforge_core::{AmPm, ModifierKind, TimeUnit};

    fn doc_time(y: i32, m: u32, d: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    fn add(graph: &mut EntityGraph, ids: &mut IdAllocator, kind: EntityKind) -> EntityId {
        graph.add(ids, Span::new(0, 1), kind)
    }

    #[test]
    fn chains_coarse_to_fine() {
        let (mut g, mut ids) = (EntityGraph::new(), IdAllocator::new());
        let year = add(&mut g, &mut ids, EntityKind::two_digit_year(89));
        let month = add(&mut g, &mut ids, EntityKind::month(Month::November));
        let day = add(&mut g, &mut ids, EntityKind::day_of_month(2));
        let hour = add(&mut g, &mut ids, EntityKind::hour(5));
        let minute = add(&mut g, &mut ids, EntityKind::minute(30));
        let second = add(&mut g, &mut ids, EntityKind::second(10));
        link(&mut g, &mut ids, None, &[], &LinkOptions::default());

        let sub = |id| g.get(id).and_then(|e| e.link(Link::SubInterval));
        assert_eq!(sub(year), Some(month));
        assert_eq!(sub(month), Some(day));
        assert_eq!(sub(day), Some(hour));
        assert_eq!(sub(hour), Some(minute));
        assert_eq!(sub(minute), Some(second));
        assert!(g.dangling_references().is_empty());
    }

    #[test]
    fn part_of_day_hangs_off_weekday_without_hour() {
        let (mut g, mut ids) = (EntityGraph::new(), IdAllocator::new());
        let dow = add(&mut g, &mut ids, EntityKind::day_of_week(Weekday::Fri));
        let part = add(&mut g, &mut ids, EntityKind::part_of_day(chronoforge_core::DayPart::Night));
        link(&mut g, &mut ids, None, &[], &LinkOptions::default());
        assert_eq!(g.get(dow).and_then(|e| e.link(Link::SubInterval)), Some(part));
    }

    #[test]
    fn orphans_are_deleted_but_keep_their_ids() {
        let (mut g, mut ids) = (EntityGraph::new(), IdAllocator::new());
        add(&mut g, &mut ids, EntityKind::AmPmOfDay { ampm: AmPm::Pm });
        add(&mut g, &mut ids, EntityKind::TimeZone { zone: "EST".into() });
        add(&mut g, &mut ids, EntityKind::Modifier { kind: ModifierKind::Approx });
        link(&mut g, &mut ids, None, &[], &LinkOptions::default());
        assert!(g.is_empty());
        assert_eq!(ids.peek(), 3);
    }

    #[test]
    fn modifier_prefers_period() {
        let (mut g, mut ids) = (EntityGraph::new(), IdAllocator::new());
        let interval = add(&mut g, &mut ids, EntityKind::calendar_interval(TimeUnit::Week));
        let period = add(&mut g, &mut ids, EntityKind::period(TimeUnit::Day));
        let m = add(&mut g, &mut ids, EntityKind::Modifier { kind: ModifierKind::Approx });
        link(&mut g, &mut ids, None, &[], &LinkOptions::default());
        assert_eq!(g.get(period).and_then(|e| e.link(Link::Modifier)), Some(m));
        assert_eq!(g.get(interval).and_then(|e| e.link(Link::Modifier)), None);
    }

    #[test]
    fn nth_prefers_period_then_interval() {
        let (mut g, mut ids) = (EntityGraph::new(), IdAllocator::new());
        let interval = add(&mut g, &mut ids, EntityKind::calendar_interval(TimeUnit::Week));
        let nth = add(&mut g, &mut ids, EntityKind::nth(3));
        link(&mut g, &mut ids, None, &[], &LinkOptions::default());
        assert_eq!(g.get(nth).and_then(|e| e.link(Link::RepeatingInterval)), Some(interval));
    }

    #[test]
    fn unanchored_nth_kept_unless_configured() {
        let (mut g, mut ids) = (EntityGraph::new(), IdAllocator::new());
        add(&mut g, &mut ids, EntityKind::nth(2));
        let mut kept = g.clone();
        link(&mut kept, &mut ids, None, &[], &LinkOptions::default());
        assert_eq!(kept.len(), 1);
        link(&mut g, &mut ids, None, &[], &LinkOptions { drop_unanchored_nth: true });
        assert!(g.is_empty());
    }

    #[test]
    fn bare_month_resolved_against_doc_time() {
        let cases = [
            (Month::November, None, Some(EntityType::Last)),
            (Month::December, Some(20), Some(EntityType::Next)),
            (Month::December, Some(15), Some(EntityType::Last)),
            (Month::December, None, None),
        ];
        for (month, day, expected) in cases {
            let (mut g, mut ids) = (EntityGraph::new(), IdAllocator::new());
            let m = add(&mut g, &mut ids, EntityKind::month(month));
            if let Some(day) = day {
                add(&mut g, &mut ids, EntityKind::day_of_month(day));
            }
            link(&mut g, &mut ids, doc_time(2020, 12, 15), &[], &LinkOptions::default());
            let op = g.find_last(&[EntityType::Last, EntityType::Next]);
            assert_eq!(op.map(|e| e.entity_type()), expected, "{month:?} {day:?}");
            if let Some(op) = op {
                assert_eq!(op.link(Link::RepeatingInterval), Some(m));
            }
        }
    }

    #[test]
    fn year_or_operator_blocks_resolution() {
        let (mut g, mut ids) = (EntityGraph::new(), IdAllocator::new());
        add(&mut g, &mut ids, EntityKind::year(2019));
        add(&mut g, &mut ids, EntityKind::month(Month::March));
        link(&mut g, &mut ids, doc_time(2020, 12, 15), &[], &LinkOptions::default());
        assert!(g.find_last(&[EntityType::Last, EntityType::Next]).is_none());
    }

    #[test]
    fn weekday_takes_tense_of_nearest_verb() {
        let tokens = vec![
            ReferenceToken::new("He", 0).with_pos("PRP"),
            ReferenceToken::new("will", 3).with_pos("MD"),
            ReferenceToken::new("arrive", 8).with_pos("VB"),
            ReferenceToken::new("Monday", 15).with_pos("NNP"),
        ];
        let (mut g, mut ids) = (EntityGraph::new(), IdAllocator::new());
        let dow = g.add(&mut ids, Span::new(15, 21), EntityKind::day_of_week(Weekday::Mon));
        link(&mut g, &mut ids, doc_time(2020, 1, 1), &tokens, &LinkOptions::default());
        let next = g.find_last(&[EntityType::Next]).expect("next");
        assert_eq!(next.link(Link::RepeatingInterval), Some(dow));

        let mut past = tokens.clone();
        past[2] = ReferenceToken::new("arrived", 8).with_pos("VBD");
        let (mut g, mut ids) = (EntityGraph::new(), IdAllocator::new());
        g.add(&mut ids, Span::new(15, 21), EntityKind::day_of_week(Weekday::Mon));
        link(&mut g, &mut ids, doc_time(2020, 1, 1), &past, &LinkOptions::default());
        assert!(g.contains_type(EntityType::Last));
    }

    #[test]
    fn weekday_without_doc_time_ignores_tense() {
        let tokens = vec![
            ReferenceToken::new("arrived", 0).with_pos("VBD"),
            ReferenceToken::new("Monday", 8).with_pos("NNP"),
        ];
        let (mut g, mut ids) = (EntityGraph::new(), IdAllocator::new());
        g.add(&mut ids, Span::new(8, 14), EntityKind::day_of_week(Weekday::Mon));
        link(&mut g, &mut ids, None, &tokens, &LinkOptions::default());
        assert!(g.find_last(&[EntityType::Last, EntityType::Next]).is_none());
    }
}
