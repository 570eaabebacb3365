//! Arena of entities with tombstone deletion.
//!
//! Slots are never removed or reordered while a phrase is being linked, so
//! positions and IDs captured early stay valid after any number of deletions.

use crate::entity::{ChronoEntity, EntityKind, EntityType, Link};
use crate::ids::{EntityId, IdAllocator};
use crate::span::Span;

#[derive(Debug, Clone)]
struct Slot {
    entity: ChronoEntity,
    deleted: bool,
}

/// Candidate list for one phrase, or the merged list for a document.
#[derive(Debug, Clone, Default)]
pub struct EntityGraph {
    slots: Vec<Slot>,
}

impl EntityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an ID, append the entity and return the ID.
    pub fn add(&mut self, ids: &mut IdAllocator, span: Span, kind: EntityKind) -> EntityId {
        let id = ids.allocate();
        self.push(ChronoEntity::new(id, span, kind));
        id
    }

    pub fn push(&mut self, entity: ChronoEntity) {
        self.slots.push(Slot { entity, deleted: false });
    }

    pub fn get(&self, id: EntityId) -> Option<&ChronoEntity> {
        self.slots
            .iter()
            .find(|s| !s.deleted && s.entity.id == id)
            .map(|s| &s.entity)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut ChronoEntity> {
        self.slots
            .iter_mut()
            .find(|s| !s.deleted && s.entity.id == id)
            .map(|s| &mut s.entity)
    }

    /// Tombstone an entity. Returns `false` if it was not live.
    pub fn delete(&mut self, id: EntityId) -> bool {
        match self.slots.iter_mut().find(|s| !s.deleted && s.entity.id == id) {
            Some(slot) => {
                slot.deleted = true;
                true
            }
            None => false,
        }
    }

    /// Set `link` on `from` to point at `to`. Both must be live.
    pub fn connect(&mut self, from: EntityId, link: Link, to: EntityId) -> bool {
        if self.get(to).is_none() {
            return false;
        }
        self.get_mut(from).map(|e| e.set_link(link, to)).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChronoEntity> {
        self.slots.iter().filter(|s| !s.deleted).map(|s| &s.entity)
    }

    /// Last live entity of any of the given types.
    pub fn find_last(&self, types: &[EntityType]) -> Option<&ChronoEntity> {
        self.iter().filter(|e| types.contains(&e.entity_type())).last()
    }

    pub fn contains_type(&self, ty: EntityType) -> bool {
        self.iter().any(|e| e.entity_type() == ty)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append every live entity of `other`.
    pub fn extend(&mut self, other: EntityGraph) {
        self.slots.extend(other.slots.into_iter().filter(|s| !s.deleted));
    }

    /// References whose target is not a live entity of this graph.
    pub fn dangling_references(&self) -> Vec<(EntityId, Link, EntityId)> {
        self.iter()
            .flat_map(|e| {
                e.references()
                    .into_iter()
                    .map(move |(link, target)| (e.id, link, target))
            })
            .filter(|(_, _, target)| self.get(*target).is_none())
            .collect()
    }

    /// Drop the tombstones and hand back the live entities in insertion order.
    pub fn into_entities(self) -> Vec<ChronoEntity> {
        self.slots
            .into_iter()
            .filter(|s| !s.deleted)
            .map(|s| s.entity)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AmPm;

    #[test]
    fn deletion_keeps_other_ids_resolvable() {
        let mut ids = IdAllocator::new();
        let mut graph = EntityGraph::new();
        let hour = graph.add(&mut ids, Span::new(0, 1), EntityKind::hour(5));
        let pm = graph.add(&mut ids, Span::new(2, 6), EntityKind::AmPmOfDay { ampm: AmPm::Pm });
        let minute = graph.add(&mut ids, Span::new(8, 10), EntityKind::minute(30));

        assert!(graph.delete(pm));
        assert!(!graph.delete(pm));
        assert!(graph.connect(hour, Link::SubInterval, minute));
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get(hour).unwrap().link(Link::SubInterval), Some(minute));
        assert!(graph.get(pm).is_none());
    }

    #[test]
    fn connect_refuses_deleted_target() {
        let mut ids = IdAllocator::new();
        let mut graph = EntityGraph::new();
        let hour = graph.add(&mut ids, Span::new(0, 1), EntityKind::hour(5));
        let pm = graph.add(&mut ids, Span::new(2, 6), EntityKind::AmPmOfDay { ampm: AmPm::Pm });
        graph.delete(pm);
        assert!(!graph.connect(hour, Link::AmPm, pm));
        assert!(graph.dangling_references().is_empty());
    }

    #[test]
    fn reports_dangling_references() {
        let mut ids = IdAllocator::new();
        let mut graph = EntityGraph::new();
        let hour = graph.add(&mut ids, Span::new(0, 1), EntityKind::hour(5));
        let pm = graph.add(&mut ids, Span::new(2, 6), EntityKind::AmPmOfDay { ampm: AmPm::Pm });
        graph.connect(hour, Link::AmPm, pm);
        graph.delete(pm);
        assert_eq!(graph.dangling_references(), vec![(hour, Link::AmPm, pm)]);
    }

    #[test]
    fn extend_skips_tombstones() {
        let mut ids = IdAllocator::new();
        let mut phrase = EntityGraph::new();
        let a = phrase.add(&mut ids, Span::new(0, 4), EntityKind::year(1998));
        let b = phrase.add(&mut ids, Span::new(5, 7), EntityKind::day_of_month(3));
        phrase.delete(a);
        let mut doc = EntityGraph::new();
        doc.extend(phrase);
        let ids: Vec<_> = doc.into_entities().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![b]);
    }
}
