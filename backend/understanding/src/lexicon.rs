//! Closed vocabularies shared by the extractors and the segmenter.
//!
//! Lookups take the normalized form of a word (lowercase, punctuation
//! stripped) unless noted otherwise.

use chrono::Weekday;
use chronoforge_core::numbers::number_from_text;
use chronoforge_core::text::Word;
use chronoforge_core::{DayPart, ModifierKind, Season, TimeUnit};
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a 12-hour clock marker, optionally glued to the time before it.
pub(crate) static AMPM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2}(?::\d{2}){1,2}|\d{1,4})?(a\.m\.?|am\.?|a\.?m|p\.m\.?|pm\.?|p\.?m)$")
        .unwrap()
});

pub(crate) const TIME_ZONES: &[&str] = &[
    "AKST", "HAST", "HADT", "CHST", "CEST", "EEST", "AST", "EST", "EDT", "CST", "CDT", "MST",
    "MDT", "PST", "PDT", "HST", "SST", "SDT", "GMT", "UTC", "BST", "CET", "IST", "MSD", "MSK",
];

pub(crate) fn weekday(word: &str) -> Option<Weekday> {
    let day = match word {
        "monday" | "mondays" | "mon" => Weekday::Mon,
        "tuesday" | "tuesdays" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wednesdays" | "wed" | "weds" => Weekday::Wed,
        "thursday" | "thursdays" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fridays" | "fri" => Weekday::Fri,
        "saturday" | "saturdays" | "sat" => Weekday::Sat,
        "sunday" | "sundays" | "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

/// Short weekday forms double as ordinary words ("sat", "wed", "sun").
pub(crate) fn is_weekday_abbreviation(word: &str) -> bool {
    !word.ends_with("day") && !word.ends_with("days")
}

pub(crate) fn season(word: &str) -> Option<Season> {
    let season = match word {
        "spring" | "springs" => Season::Spring,
        "summer" | "summers" => Season::Summer,
        "fall" | "falls" | "autumn" | "autumns" => Season::Fall,
        "winter" | "winters" => Season::Winter,
        _ => return None,
    };
    Some(season)
}

/// Part of day, and whether only a trailing "night" names it.
///
/// "tonight" and "overnight" only annotate their "night" suffix.
pub(crate) fn day_part(word: &str) -> Option<(DayPart, bool)> {
    let part = match word {
        "morning" | "mornings" => DayPart::Morning,
        "dawn" => DayPart::Dawn,
        "afternoon" | "afternoons" => DayPart::Afternoon,
        "evening" | "evenings" | "dusk" => DayPart::Evening,
        "noon" => DayPart::Noon,
        "midnight" => DayPart::Midnight,
        "night" | "nights" => DayPart::Night,
        "tonight" | "overnight" => return Some((DayPart::Night, true)),
        "bedtime" => DayPart::Unknown,
        _ => return None,
    };
    Some((part, false))
}

pub(crate) fn is_weekend(word: &str) -> bool {
    matches!(word, "weekend" | "weekends")
}

/// Unit named by a period or calendar-interval term.
///
/// "time", "soon" and "quarter" carry no usable unit and map to `Unknown`.
pub(crate) fn interval_unit(word: &str) -> Option<TimeUnit> {
    let unit = match word {
        "second" | "seconds" => TimeUnit::Second,
        "minute" | "minutes" => TimeUnit::Minute,
        "hour" | "hours" | "hourly" => TimeUnit::Hour,
        "day" | "days" | "daily" | "yesterday" => TimeUnit::Day,
        "week" | "weeks" | "weekly" => TimeUnit::Week,
        "month" | "months" | "monthly" => TimeUnit::Month,
        "year" | "years" | "yearly" => TimeUnit::Year,
        "decade" | "decades" => TimeUnit::Decade,
        "century" | "centuries" => TimeUnit::Century,
        "time" | "soon" | "quarter" => TimeUnit::Unknown,
        _ => return None,
    };
    Some(unit)
}

/// Interval terms that can trail a number inside one word ("3weeks").
pub(crate) const EMBEDDED_UNITS: &[&str] = &[
    "centuries", "century", "decades", "decade", "minutes", "minute", "seconds", "second",
    "hourly", "hours", "hour", "weekly", "weeks", "week", "monthly", "months", "month", "yearly",
    "years", "year", "daily", "days", "day",
];

/// `<number><unit>` inside one word. Returns the number and the byte
/// offset where the unit begins.
pub(crate) fn split_embedded(core: &str) -> Option<(i64, usize, &'static str)> {
    let lowered = core.to_ascii_lowercase();
    EMBEDDED_UNITS.iter().find_map(|&unit| {
        let prefix = lowered.strip_suffix(unit)?;
        let number = prefix.trim_end_matches('-');
        if number.is_empty() {
            return None;
        }
        let value = number_from_text(number)?;
        Some((value, lowered.len() - unit.len(), unit))
    })
}

pub(crate) fn modifier_kind(word: &str) -> Option<ModifierKind> {
    let kind = match word {
        "nearly" | "almost" | "<" => ModifierKind::LessThan,
        "about" | "approximately" | "around" | "roughly" => ModifierKind::Approx,
        "late" => ModifierKind::End,
        "mid" => ModifierKind::Mid,
        "fiscal" | "fy" => ModifierKind::Fiscal,
        "over" => ModifierKind::MoreThan,
        "early" | "beginning" => ModifierKind::Start,
        _ => return None,
    };
    Some(kind)
}

/// Direction of a before/after trigger word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Before,
    After,
}

pub(crate) fn direction(word: &str) -> Option<Direction> {
    match word {
        "before" | "ago" | "pre" | "prior" | "previously" | "earlier" | "until" => {
            Some(Direction::Before)
        }
        "after" | "later" | "post" | "following" => Some(Direction::After),
        _ => None,
    }
}

/// Words that license an operator over an adjacent interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperatorWord {
    This,
    Next,
    Last,
    /// "a", "each", "between", "from": blocks the lookup but builds nothing.
    Other,
}

pub(crate) fn operator_word(word: &str) -> Option<OperatorWord> {
    match word {
        "this" => Some(OperatorWord::This),
        "next" => Some(OperatorWord::Next),
        "last" => Some(OperatorWord::Last),
        "a" | "each" | "between" | "from" => Some(OperatorWord::Other),
        _ => None,
    }
}

/// Other words that make a token temporal on their own.
pub(crate) fn is_temporal_word(word: &str) -> bool {
    matches!(
        word,
        "this" | "now" | "current" | "currently" | "last" | "before" | "previously" | "ago"
            | "pre" | "after" | "later" | "earlier" | "early" | "until" | "quarter" | "time"
            | "next" | "previous" | "coming" | "past" | "point" | "long" | "period" | "lately"
            | "future" | "awhile" | "briefly" | "longstanding" | "soon" | "shortly" | "length"
            | "final" | "latest" | "prior" | "recent" | "recently" | "today" | "todays"
            | "tomorrow" | "yesterday" | "tonight" | "annual" | "annually" | "hr" | "hrs"
            | "min" | "mins"
    )
}

/// The one distinct vocabulary hit among `words`.
///
/// A term occurring several times counts once and resolves to its first
/// occurrence; two different terms make the lookup abstain.
pub(crate) fn single_hit<T>(
    words: &[Word<'_>],
    lookup: impl Fn(&str) -> Option<T>,
) -> Option<(usize, T)> {
    let mut found: Option<(usize, T)> = None;
    for (i, word) in words.iter().enumerate() {
        let Some(value) = lookup(&word.norm) else {
            continue;
        };
        match &found {
            None => found = Some((i, value)),
            Some((first, _)) if words[*first].norm == word.norm => {}
            Some(_) => return None,
        }
    }
    found
}

/// Longest run of words ending right before `before` that reads as a number
/// (digits, cardinal words or an ordinal).
///
/// Returns the value and the local byte range the words cover.
pub(crate) fn preceding_number(
    text: &str,
    words: &[Word<'_>],
    before: usize,
) -> Option<(i64, usize, usize)> {
    let head: Vec<&Word<'_>> = words.iter().filter(|w| w.end <= before).collect();
    (1..=head.len()).rev().find_map(|k| {
        let first = head[head.len() - k];
        let last = head[head.len() - 1];
        let value = number_from_text(&text[first.start..last.end])?;
        Some((value, first.start, last.end))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronoforge_core::text::words;

    #[test]
    fn single_hit_abstains_on_two_terms() {
        let ws = words("monday or tuesday");
        assert!(single_hit(&ws, weekday).is_none());
        let ws = words("Monday, every monday");
        assert_eq!(single_hit(&ws, weekday), Some((0, Weekday::Mon)));
    }

    #[test]
    fn day_part_sub_ranges() {
        assert_eq!(day_part("tonight"), Some((DayPart::Night, true)));
        assert_eq!(day_part("midnight"), Some((DayPart::Midnight, false)));
        assert_eq!(day_part("bedtime").map(|p| p.0), Some(DayPart::Unknown));
    }

    #[test]
    fn embedded_units() {
        assert_eq!(split_embedded("3weeks"), Some((3, 1, "weeks")));
        assert_eq!(split_embedded("10-Day"), Some((10, 3, "day")));
        assert_eq!(split_embedded("today"), None);
        assert_eq!(split_embedded("weeks"), None);
    }

    #[test]
    fn preceding_number_prefers_longest_run() {
        let text = "for twenty five years";
        let ws = words(text);
        assert_eq!(preceding_number(text, &ws, 16), Some((25, 4, 15)));
        let text = "3-4 weeks";
        assert_eq!(preceding_number(text, &words(text), 4), None);
    }

    #[test]
    fn ampm_forms() {
        for form in ["pm", "p.m.", "P.M", "5pm", "10:30am", "AM."] {
            assert!(AMPM_RE.is_match(form), "{form}");
        }
        assert!(!AMPM_RE.is_match("ham"));
        let caps = AMPM_RE.captures("530pm").unwrap();
        assert_eq!(&caps[1], "530");
    }
}
