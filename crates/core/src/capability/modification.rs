//! Modification capabilities: when, and by whom, a record was last updated.

use crate::entity::Entity;
use crate::time::Timestamp;

/// Object records its latest update. Absent until the first update.
pub trait HasModificationTime {
    type Time: Timestamp;

    fn modified_at(&self) -> Option<Self::Time>;

    fn set_modified_at(&mut self, at: Self::Time);
}

/// Object records the actor behind its latest update.
pub trait HasModifierId<K> {
    fn modified_by(&self) -> Option<&K>;

    fn set_modified_by(&mut self, actor: K);
}

/// Modifier id plus a navigation reference to the modifying actor.
pub trait HasModifier<K>: HasModifierId<K> {
    type Actor: Entity<Id = K>;

    fn modifier(&self) -> Option<&Self::Actor>;

    fn set_modifier(&mut self, modifier: Option<Self::Actor>);

    fn modifier_is_consistent(&self) -> bool
    where
        K: PartialEq,
    {
        match (self.modifier(), self.modified_by()) {
            (None, _) => true,
            (Some(modifier), Some(id)) => modifier.id() == id,
            (Some(_), None) => false,
        }
    }
}

pub trait ModificationTimeExt: HasModificationTime {
    fn stamp_modified_now(&mut self) {
        self.set_modified_at(<Self::Time as Timestamp>::now());
    }
}

impl<T: HasModificationTime + ?Sized> ModificationTimeExt for T {}

pub trait ModificationAuditExt<K>: HasModificationTime + HasModifierId<K> {
    fn stamp_modified(&mut self, actor: K, at: Self::Time) {
        self.set_modified_at(at);
        self.set_modified_by(actor);
    }

    fn stamp_modified_now_by(&mut self, actor: K) {
        self.stamp_modified(actor, <Self::Time as Timestamp>::now());
    }
}

impl<K, T: HasModificationTime + HasModifierId<K> + ?Sized> ModificationAuditExt<K> for T {}
