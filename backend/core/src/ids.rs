//! Document-wide entity identifiers.

use std::fmt;

use serde::{Serialize, Serializer};

/// Identifier of a [`ChronoEntity`](crate::ChronoEntity), rendered as `"<n>entity"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}entity", self.0)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Monotonic ID source for one document.
///
/// Passed by `&mut` through every extractor and the linker. IDs are never
/// handed out twice, including IDs of entities that are later deleted.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume numbering from `next`, e.g. after a previous document.
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// The value the next call to [`allocate`](Self::allocate) will use.
    pub fn peek(&self) -> u64 {
        self.next
    }
}
