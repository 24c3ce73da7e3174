//! Creation capabilities: when, and by whom, a record was first persisted.

use crate::entity::Entity;
use crate::time::Timestamp;

/// Object records the moment it was first persisted.
///
/// `None` until the first insert; set exactly once afterwards.
pub trait HasCreationTime {
    type Time: Timestamp;

    fn created_at(&self) -> Option<Self::Time>;

    fn set_created_at(&mut self, at: Self::Time);
}

/// Object records which actor first persisted it.
pub trait HasCreatorId<K> {
    fn created_by(&self) -> Option<&K>;

    fn set_created_by(&mut self, actor: K);
}

/// Creator id plus a navigation reference to the creating actor.
pub trait HasCreator<K>: HasCreatorId<K> {
    type Actor: Entity<Id = K>;

    fn creator(&self) -> Option<&Self::Actor>;

    fn set_creator(&mut self, creator: Option<Self::Actor>);

    /// Whether the loaded creator (if any) is the one named by `created_by`.
    ///
    /// Keeping the two in step is the host's job; this only checks it.
    fn creator_is_consistent(&self) -> bool
    where
        K: PartialEq,
    {
        match (self.creator(), self.created_by()) {
            (None, _) => true,
            (Some(creator), Some(id)) => creator.id() == id,
            (Some(_), None) => false,
        }
    }
}

/// Typed creation setters for statically known shapes.
pub trait CreationTimeExt: HasCreationTime {
    fn stamp_created_now(&mut self) {
        self.set_created_at(<Self::Time as Timestamp>::now());
    }
}

impl<T: HasCreationTime + ?Sized> CreationTimeExt for T {}

/// Typed creation setters for objects carrying both time and actor.
pub trait CreationAuditExt<K>: HasCreationTime + HasCreatorId<K> {
    fn stamp_created(&mut self, actor: K, at: Self::Time) {
        self.set_created_at(at);
        self.set_created_by(actor);
    }

    fn stamp_created_now_by(&mut self, actor: K) {
        self.stamp_created(actor, <Self::Time as Timestamp>::now());
    }
}

impl<K, T: HasCreationTime + HasCreatorId<K> + ?Sized> CreationAuditExt<K> for T {}
