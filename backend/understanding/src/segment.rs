//! Temporal token marking and phrase segmentation.
//!
//! Tokens are marked from lexical evidence alone; extractors apply the
//! stricter checks (POS, exactly-one-term) later, so marking may over-mark.

use chrono::NaiveDateTime;
use chronoforge_core::numbers::{month_from_name, number_from_text};
use chronoforge_core::text::is_digits;
use chronoforge_core::{ReferenceToken, TemporalPhrase};
use tracing::{debug, warn};

use crate::extractors::calendar::{LONE_YEAR_RANGE, is_clock, parse_date};
use crate::lexicon::{
    AMPM_RE, TIME_ZONES, day_part, interval_unit, is_temporal_word, is_weekday_abbreviation,
    is_weekend, modifier_kind, season, split_embedded, weekday,
};

fn core(text: &str) -> &str {
    text.trim_matches(|c: char| {
        matches!(c, ',' | ';' | ':' | '(' | ')' | '[' | ']' | '"' | '\'' | '!' | '?')
    })
}

fn is_hhmm(word: &str) -> bool {
    if word.len() != 4 || !is_digits(word) {
        return false;
    }
    let (hour, minute) = word.split_at(2);
    matches!((hour.parse::<u32>(), minute.parse::<u32>()), (Ok(h), Ok(m)) if h <= 24 && m < 60)
}

fn is_date_or_time(word: &str) -> bool {
    if parse_date(word).is_some() || is_clock(word) {
        return true;
    }
    if !is_digits(word) {
        return false;
    }
    match word.len() {
        4 => word.parse::<i32>().is_ok_and(|y| LONE_YEAR_RANGE.contains(&y)),
        6 | 8 => true,
        _ => false,
    }
}

/// Whether a token is temporal on lexical grounds.
pub fn is_temporal(token: &ReferenceToken) -> bool {
    let word = core(&token.text);
    let norm = token.normalized();
    // a present tag that is not a noun rules out "may" the modal, "fall" the verb
    let noun_or_untagged = token.pos.is_none() || token.is_noun();

    (month_from_name(&norm).is_some() && noun_or_untagged)
        || weekday(&norm).is_some_and(|_| !is_weekday_abbreviation(&norm) || token.is_noun())
        || interval_unit(&norm).is_some()
        || split_embedded(word).is_some()
        || AMPM_RE.is_match(word)
        || is_hhmm(word)
        || is_date_or_time(word)
        || is_weekend(&norm)
        || (season(&norm).is_some() && noun_or_untagged)
        || day_part(&norm).is_some()
        || TIME_ZONES.contains(&word)
        || is_temporal_word(&norm)
        || modifier_kind(&norm).is_some()
        || word.starts_with('<')
}

/// Set `temporal` and `numeric` on every token.
pub fn mark_temporal(tokens: &mut [ReferenceToken]) {
    for token in tokens.iter_mut() {
        token.temporal = is_temporal(token);
        token.numeric = number_from_text(&token.normalized()).is_some();
    }
}

fn is_money_or_magnitude(token: &ReferenceToken) -> bool {
    token.text.contains(['$', '€', '£'])
        || token.text.ends_with('%')
        || matches!(token.normalized().as_str(), "percent" | "million" | "billion")
}

/// Group marked tokens into candidate phrases.
///
/// A run holds consecutive tokens that are temporal, or numeric next to a
/// temporal token in the same sentence. Runs end at sentence changes and
/// line breaks; runs with no temporal token are dropped.
pub fn temporal_phrases(
    text: &str,
    tokens: &[ReferenceToken],
    doc_time: Option<NaiveDateTime>,
) -> Vec<TemporalPhrase> {
    let blocked: Vec<bool> = tokens
        .iter()
        .enumerate()
        .map(|(i, t)| {
            is_money_or_magnitude(t)
                || (t.numeric && tokens.get(i + 1).is_some_and(is_money_or_magnitude))
        })
        .collect();
    let temporal_neighbour = |i: usize| {
        let sentence = tokens[i].sentence;
        i.checked_sub(1)
            .into_iter()
            .chain([i + 1])
            .filter_map(|j| tokens.get(j))
            .any(|t| t.temporal && t.sentence == sentence)
    };
    let eligible = |i: usize| {
        let t = &tokens[i];
        !blocked[i] && (t.temporal || (t.numeric && temporal_neighbour(i)))
    };
    let continues = |prev: &ReferenceToken, cur: &ReferenceToken| {
        prev.sentence == cur.sentence
            && text
                .get(prev.span.end..cur.span.start)
                .is_some_and(|gap| !gap.contains('\n'))
    };

    let mut runs: Vec<Vec<usize>> = Vec::new();
    for i in (0..tokens.len()).filter(|&i| eligible(i)) {
        let extends = runs
            .last()
            .and_then(|run| run.last())
            .is_some_and(|&p| p + 1 == i && continues(&tokens[p], &tokens[i]));
        match runs.last_mut() {
            Some(run) if extends => run.push(i),
            _ => runs.push(vec![i]),
        }
    }

    let mut phrases = Vec::new();
    for run in runs {
        if !run.iter().any(|&i| tokens[i].temporal) {
            continue;
        }
        let (first, last) = (&tokens[run[0]], &tokens[run[run.len() - 1]]);
        let Some(slice) = text.get(first.span.start..last.span.end) else {
            warn!(
                start = first.span.start,
                end = last.span.end,
                "token span outside document text"
            );
            continue;
        };
        phrases.push(TemporalPhrase::new(slice, first.span.start).with_doc_time(doc_time));
    }
    debug!(tokens = tokens.len(), phrases = phrases.len(), "segmented temporal phrases");
    phrases
}
