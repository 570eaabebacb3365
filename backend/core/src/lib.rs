//! `chronoforge-core`: the temporal entity graph and the primitives shared
//! by the extractor cascade and the classifier.

pub mod entity;
pub mod error;
pub mod graph;
pub mod ids;
pub mod numbers;
pub mod phrase;
pub mod render;
pub mod span;
pub mod text;
pub mod token;

pub use entity::{
    weekday_name, AmPm, ChronoEntity, DayPart, EntityKind, EntityType, IntervalType, Link,
    ModifierKind, Operator, ParentType, Season, Semantics, TimeUnit, WeekPart,
};
pub use error::ChronoError;
pub use graph::EntityGraph;
pub use ids::{EntityId, IdAllocator};
pub use phrase::TemporalPhrase;
pub use span::Span;
pub use token::{token_index_at, ReferenceToken};
