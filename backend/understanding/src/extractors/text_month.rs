//! Spelled month names with the day and year written around them.

use chronoforge_core::numbers::{month_from_name, number_from_text};
use chronoforge_core::{ChronoError, EntityGraph, EntityKind, IdAllocator, Operator, Semantics};
use tracing::debug;

use super::calendar::LONE_YEAR_RANGE;
use super::operator_entity;
use crate::context::PhraseContext;
use crate::lexicon::{operator_word, single_hit};
use crate::state::ExtractionState;

fn separator(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == '.'
}

/// What a number after the month reads as.
fn classify(value: i64) -> Option<EntityKind> {
    if (1..=31).contains(&value) {
        return Some(EntityKind::day_of_month(value as u32));
    }
    let year = i32::try_from(value).ok()?;
    LONE_YEAR_RANGE.contains(&year).then(|| EntityKind::year(year))
}

/// Month entity; day and year from the text after it; an operator from a
/// this/next/last word before it.
///
/// The month word must be tagged as a noun so "may" the modal is skipped.
pub fn build_text_month(
    ctx: &PhraseContext<'_>,
    graph: &mut EntityGraph,
    ids: &mut IdAllocator,
    state: ExtractionState,
) -> Result<ExtractionState, ChronoError> {
    if state.month {
        return Ok(state);
    }
    let text = ctx.text();
    let words = ctx.words();
    let Some((index, month)) = single_hit(&words, month_from_name) else {
        return Ok(state);
    };
    let word = &words[index];
    if !ctx.is_noun_at(word.start, word.end) {
        return Ok(state);
    }
    let abbreviated = month.name().to_lowercase() != word.norm;
    let end = if abbreviated { word.end_with_dot(text) } else { word.end };
    let month_id = graph.add(ids, ctx.absolute(word.start, end), EntityKind::month(month));
    debug!(entity = %month_id, month = month.name(), "text month");
    let mut state = state.with_month();

    // Everything after the month either reads as one number ("twenty-first")
    // or is scanned word by word ("3, 1998").
    let rest = &text[end..];
    let lead = rest.len() - rest.trim_start_matches(separator).len();
    let core = rest.trim_matches(separator);
    let mut found: Vec<(usize, usize, EntityKind)> = Vec::new();
    match number_from_text(core).filter(|_| !core.is_empty()).and_then(classify) {
        Some(kind) => found.push((end + lead, end + lead + core.len(), kind)),
        None => {
            for w in words.iter().filter(|w| w.start >= end) {
                if let Some(kind) = number_from_text(&text[w.start..w.end]).and_then(classify) {
                    found.push((w.start, w.end, kind));
                }
            }
        }
    }
    for (start, end, kind) in found {
        let wanted = match kind {
            EntityKind::DayOfMonth { .. } => !state.day,
            _ => !state.four_digit_year,
        };
        if !wanted {
            continue;
        }
        state = match kind {
            EntityKind::DayOfMonth { .. } => state.with_day(),
            _ => state.with_year(false),
        };
        graph.add(ids, ctx.absolute(start, end), kind);
    }

    if let Some((i, op)) = single_hit(&words[..index], operator_word) {
        let operand = Operator::over_repeating(month_id);
        if let Some(kind) = operator_entity(op, operand, Semantics::IntervalNotIncluded) {
            graph.add(ids, ctx.absolute(words[i].start, words[i].end), kind);
        }
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::calendar::build_year;
    use crate::testing::{run_stages, run_tagged};
    use chrono::Month;
    use chronoforge_core::{EntityType, Link};

    fn kinds(text: &str) -> Vec<(EntityKind, String)> {
        let (graph, _) = run_stages(text, &[build_year, build_text_month]);
        graph
            .iter()
            .map(|e| (e.kind.clone(), text[e.span.start..e.span.end].to_string()))
            .collect()
    }

    #[test]
    fn abbreviated_month_with_day_and_year() {
        let found = kinds("Nov. 3, 1998");
        assert_eq!(found[0], (EntityKind::year(1998), "1998".to_string()));
        assert_eq!(found[1], (EntityKind::month(Month::November), "Nov.".to_string()));
        assert_eq!(found[2], (EntityKind::day_of_month(3), "3".to_string()));
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn spelled_day_after_month() {
        let found = kinds("March twenty-first");
        assert_eq!(found[1], (EntityKind::day_of_month(21), "twenty-first".to_string()));
    }

    #[test]
    fn spelled_year_after_month() {
        let found = kinds("June nineteen ninety eight");
        assert_eq!(found[1].0, EntityKind::year(1998));
    }

    #[test]
    fn modal_may_is_not_a_month() {
        let (graph, state) = run_tagged("may 3", &["MD", "CD"], &[build_text_month]);
        assert!(graph.is_empty());
        assert!(!state.month);
    }

    #[test]
    fn preceding_operator_spans_its_word() {
        let text = "last December";
        let (graph, _) = run_stages(text, &[build_text_month]);
        let month = graph.find_last(&[EntityType::MonthOfYear]).expect("month").id;
        let last = graph.find_last(&[EntityType::Last]).expect("last");
        assert_eq!(&text[last.span.start..last.span.end], "last");
        assert_eq!(last.link(Link::RepeatingInterval), Some(month));
    }
}
