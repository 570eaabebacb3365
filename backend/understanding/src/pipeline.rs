//! The ordered extraction cascade and the document driver.

use chronoforge_classifier::{DEFAULT_WINDOW, PeriodIntervalClassifier};
use chronoforge_core::{
    ChronoEntity, ChronoError, EntityGraph, IdAllocator, ReferenceToken, TemporalPhrase,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::PhraseContext;
use crate::extractors::{
    ampm, before_after, calendar, day_of_week, modifier, nth, numeric_date, parts,
    period_interval, season, text_month, text_year, this, time_zone, twenty_four_hour,
};
use crate::linker::{LinkOptions, link};
use crate::state::ExtractionState;

pub type StageFn = fn(
    &PhraseContext<'_>,
    &mut EntityGraph,
    &mut IdAllocator,
    ExtractionState,
) -> Result<ExtractionState, ChronoError>;

/// One named step of the cascade.
#[derive(Clone, Copy)]
pub struct Stage {
    pub name: &'static str,
    pub run: StageFn,
}

/// Extraction order. Later stages read the flags earlier ones set:
///
/// - the year stages run before numeric dates and 24-hour times, so a lone
///   year blocks both
/// - slash dates and colon clocks claim month/day/hour/minute before the
///   spelled-out and condensed forms
/// - AM/PM runs after every clock reader so it only recovers an hour when
///   none was found
/// - the time zone runs last and may find a zone glued to an `HHMM` time
pub const STAGES: &[Stage] = &[
    Stage { name: "year", run: calendar::build_year },
    Stage { name: "two_digit_year", run: calendar::build_two_digit_year },
    Stage { name: "month", run: calendar::build_month },
    Stage { name: "day", run: calendar::build_day },
    Stage { name: "hour", run: calendar::build_hour },
    Stage { name: "minute", run: calendar::build_minute },
    Stage { name: "second", run: calendar::build_second },
    Stage { name: "modifier", run: modifier::build_modifier },
    Stage { name: "numeric_date", run: numeric_date::build_numeric_date },
    Stage { name: "twenty_four_hour", run: twenty_four_hour::build_twenty_four_hour },
    Stage { name: "day_of_week", run: day_of_week::build_day_of_week },
    Stage { name: "text_month", run: text_month::build_text_month },
    Stage { name: "ampm", run: ampm::build_ampm },
    Stage { name: "part_of_day", run: parts::build_part_of_day },
    Stage { name: "part_of_week", run: parts::build_part_of_week },
    Stage { name: "season", run: season::build_season },
    Stage { name: "period_interval", run: period_interval::build_period_interval },
    Stage { name: "text_year", run: text_year::build_text_year },
    Stage { name: "this", run: this::build_this },
    Stage { name: "before_after", run: before_after::build_before_after },
    Stage { name: "nth", run: nth::build_nth },
    Stage { name: "time_zone", run: time_zone::build_time_zone },
];

/// Knobs for a whole document run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// Classifier bag-of-words window.
    pub window: usize,
    pub link: LinkOptions,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { window: DEFAULT_WINDOW, link: LinkOptions::default() }
    }
}

/// Run every stage over one phrase, then link the result.
pub fn build_phrase(
    ctx: &PhraseContext<'_>,
    ids: &mut IdAllocator,
    options: &LinkOptions,
) -> Result<EntityGraph, ChronoError> {
    let mut graph = EntityGraph::new();
    let mut state = ExtractionState::default();
    for stage in STAGES {
        let before = graph.len();
        state = (stage.run)(ctx, &mut graph, ids, state)?;
        if graph.len() > before {
            debug!(stage = stage.name, added = graph.len() - before, "stage matched");
        }
    }
    link(&mut graph, ids, ctx.doc_time(), ctx.tokens, options);
    Ok(graph)
}

/// Build and merge the entities of every phrase, in phrase order.
///
/// IDs come from `ids`; the caller keeps the allocator to continue numbering.
pub fn build_document(
    phrases: &[TemporalPhrase],
    tokens: &[ReferenceToken],
    classifier: &dyn PeriodIntervalClassifier,
    ids: &mut IdAllocator,
    options: &BuildOptions,
) -> Result<Vec<ChronoEntity>, ChronoError> {
    if tokens.is_empty() && !phrases.is_empty() {
        return Err(ChronoError::EmptyTokenStream);
    }
    let mut document = EntityGraph::new();
    for phrase in phrases {
        let ctx = PhraseContext::new(phrase, tokens, classifier).with_window(options.window);
        let graph = build_phrase(&ctx, ids, &options.link)?;
        debug!(phrase = %phrase.text, entities = graph.len(), "phrase built");
        document.extend(graph);
    }
    info!(
        phrases = phrases.len(),
        entities = document.len(),
        next_id = ids.peek(),
        "document built"
    );
    Ok(document.into_entities())
}
