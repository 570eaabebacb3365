//! Sub-entity extractors, one function per pipeline stage.
//!
//! Every stage has the same shape: read the phrase, append whatever it finds
//! to the phrase graph, and return the updated [`ExtractionState`]. A stage
//! that finds nothing returns the state unchanged.
//!
//! [`ExtractionState`]: crate::state::ExtractionState

pub mod ampm;
pub mod before_after;
pub mod calendar;
pub mod day_of_week;
pub mod modifier;
pub mod nth;
pub mod numeric_date;
pub mod parts;
pub mod period_interval;
pub mod season;
pub mod text_month;
pub mod text_year;
pub mod this;
pub mod time_zone;
pub mod twenty_four_hour;

use chronoforge_core::{EntityKind, Operator, Semantics};

use crate::lexicon::OperatorWord;

/// Operator entity built from a this/next/last word.
///
/// `last` is the semantics the caller wants on a Last operator; the other
/// operators carry none.
pub(crate) fn operator_entity(
    word: OperatorWord,
    operand: Operator,
    last: Semantics,
) -> Option<EntityKind> {
    match word {
        OperatorWord::This => Some(EntityKind::This(operand)),
        OperatorWord::Next => Some(EntityKind::Next(operand)),
        OperatorWord::Last => Some(EntityKind::Last(operand.with_semantics(last))),
        OperatorWord::Other => None,
    }
}
