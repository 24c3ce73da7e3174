//! Entity trait: identity of audited records and of the actors behind them.

/// A persisted record with a stable identity.
///
/// Used for records carrying audit fields, for actor references
/// (`HasCreator::Actor` and friends), and for event-store records. The
/// identifier never changes once the record is persisted.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` refers to the same record.
    fn same_identity<O>(&self, other: &O) -> bool
    where
        O: Entity<Id = Self::Id> + ?Sized,
        Self: Sized,
    {
        self.id() == other.id()
    }
}
