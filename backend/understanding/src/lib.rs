//! `chronoforge-understanding`: turns reference tokens into temporal phrases
//! and each phrase into a linked entity graph.
//!
//! ```text
//! tokens --mark_temporal--> temporal_phrases --STAGES--> link --> entities
//! ```

pub mod context;
pub mod extractors;
mod lexicon;
pub mod linker;
pub mod pipeline;
pub mod segment;
pub mod state;

#[cfg(test)]
mod testing;

pub use context::PhraseContext;
pub use linker::{LinkOptions, link};
pub use pipeline::{BuildOptions, STAGES, Stage, StageFn, build_document, build_phrase};
pub use segment::{is_temporal, mark_temporal, temporal_phrases};
pub use state::ExtractionState;
