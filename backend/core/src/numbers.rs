//! Spelled-out numbers, ordinals and month names.

use chrono::Month;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::is_digits;

static ORDINAL_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)$").unwrap());

fn cardinal_word(word: &str) -> Option<i64> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        "hundred" => 100,
        "thousand" => 1_000,
        "million" => 1_000_000,
        "billion" => 1_000_000_000,
        _ => return None,
    };
    Some(value)
}

fn is_magnitude(word: &str) -> bool {
    matches!(word, "hundred" | "thousand" | "million" | "billion")
}

/// Words that open a spoken year such as "nineteen ninety eight".
fn century_prefix(word: &str) -> Option<i64> {
    match word {
        "eleven" | "twelve" | "thirteen" | "fourteen" | "fifteen" | "sixteen" | "seventeen"
        | "eighteen" | "nineteen" | "twenty" => cardinal_word(word),
        _ => None,
    }
}

/// Sum the number words; `None` on an unknown word or on overflow.
fn accumulate(words: &[&str]) -> Option<i64> {
    let mut total = 0i64;
    let mut current = 0i64;
    for w in words {
        let v = cardinal_word(w)?;
        match v {
            100 => current = current.max(1).checked_mul(100)?,
            v if v >= 1_000 => {
                total = total.checked_add(current.max(1).checked_mul(v)?)?;
                current = 0;
            }
            v => current = current.checked_add(v)?,
        }
    }
    total.checked_add(current)
}

/// Parse a cardinal written in digits or English words.
///
/// Hyphens split words and "and" is ignored. Every remaining word must be a
/// number word. A leading teen or "twenty" followed by a non-magnitude word is
/// read as a spoken year: "nineteen ninety eight" is 1998.
pub fn words_to_number(text: &str) -> Option<i64> {
    let lowered = text.trim().to_lowercase();
    if is_digits(&lowered) {
        return lowered.parse().ok();
    }
    let spaced = lowered.replace('-', " ");
    let words: Vec<&str> = spaced.split_whitespace().filter(|w| *w != "and").collect();
    if words.is_empty() {
        return None;
    }
    if words.len() > 1 && !is_magnitude(words[1]) {
        if let Some(century) = century_prefix(words[0]) {
            let rest = accumulate(&words[1..])?;
            if rest >= 10 {
                return century.checked_mul(100)?.checked_add(rest);
            }
        }
    }
    accumulate(&words)
}

fn ordinal_word(word: &str) -> Option<u32> {
    let value = match word {
        "first" => 1,
        "second" => 2,
        "third" => 3,
        "fourth" => 4,
        "fifth" => 5,
        "sixth" => 6,
        "seventh" => 7,
        "eighth" => 8,
        "ninth" => 9,
        "tenth" => 10,
        "eleventh" => 11,
        "twelfth" => 12,
        "thirteenth" => 13,
        "fourteenth" => 14,
        "fifteenth" => 15,
        "sixteenth" => 16,
        "seventeenth" => 17,
        "eighteenth" => 18,
        "nineteenth" => 19,
        "twentieth" => 20,
        "thirtieth" => 30,
        _ => return None,
    };
    Some(value)
}

/// Parse "3rd", "third", "twenty-first" or "thirty first".
pub fn ordinal_value(text: &str) -> Option<u32> {
    let lowered = text.trim().to_lowercase();
    if let Some(caps) = ORDINAL_SUFFIX_RE.captures(&lowered) {
        return caps[1].parse().ok();
    }
    let spaced = lowered.replace('-', " ");
    let parts: Vec<&str> = spaced.split_whitespace().collect();
    match parts.as_slice() {
        [single] => ordinal_word(single),
        [tens @ ("twenty" | "thirty"), unit] => {
            let unit = ordinal_word(unit).filter(|u| *u < 10)?;
            Some(cardinal_word(tens)? as u32 + unit)
        }
        _ => None,
    }
}

/// A cardinal if the text is one, else an ordinal.
pub fn number_from_text(text: &str) -> Option<i64> {
    words_to_number(text).or_else(|| ordinal_value(text).map(i64::from))
}

/// Month from a full name or a common abbreviation, any case.
pub fn month_from_name(name: &str) -> Option<Month> {
    let month = match name.trim_end_matches('.').to_lowercase().as_str() {
        "january" | "jan" => Month::January,
        "february" | "feb" => Month::February,
        "march" | "mar" => Month::March,
        "april" | "apr" => Month::April,
        "may" => Month::May,
        "june" | "jun" => Month::June,
        "july" | "jul" => Month::July,
        "august" | "aug" => Month::August,
        "september" | "sep" | "sept" => Month::September,
        "october" | "oct" => Month::October,
        "november" | "nov" => Month::November,
        "december" | "dec" => Month::December,
        _ => return None,
    };
    Some(month)
}

/// Month from its 1-based number.
pub fn month_from_number(n: u32) -> Option<Month> {
    u8::try_from(n).ok().and_then(|n| Month::try_from(n).ok())
}
