//! Deletion capabilities: soft-delete flag plus when, and by whom, it was raised.
//!
//! Every deletion capability implies [`SoftDeletable`]: a record that tracks
//! its deletion time or deleter is never physically removed by the auditing
//! layer.

use crate::entity::Entity;
use crate::time::Timestamp;

/// Object can be logically deleted by raising a flag.
///
/// Filtering deleted rows out of active queries is the host's responsibility.
pub trait SoftDeletable {
    fn is_deleted(&self) -> bool;

    fn set_deleted(&mut self, deleted: bool);

    fn mark_deleted(&mut self) {
        self.set_deleted(true);
    }
}

/// Object records when it was soft-deleted.
pub trait HasDeletionTime: SoftDeletable {
    type Time: Timestamp;

    fn deleted_at(&self) -> Option<Self::Time>;

    fn set_deleted_at(&mut self, at: Self::Time);
}

/// Object records which actor soft-deleted it.
pub trait HasDeleterId<K>: SoftDeletable {
    fn deleted_by(&self) -> Option<&K>;

    fn set_deleted_by(&mut self, actor: K);
}

/// Deleter id plus a navigation reference to the deleting actor.
pub trait HasDeleter<K>: HasDeleterId<K> {
    type Actor: Entity<Id = K>;

    fn deleter(&self) -> Option<&Self::Actor>;

    fn set_deleter(&mut self, deleter: Option<Self::Actor>);

    fn deleter_is_consistent(&self) -> bool
    where
        K: PartialEq,
    {
        match (self.deleter(), self.deleted_by()) {
            (None, _) => true,
            (Some(deleter), Some(id)) => deleter.id() == id,
            (Some(_), None) => false,
        }
    }
}

/// Typed deletion setters. Each one also raises the soft-delete flag.
pub trait DeletionTimeExt: HasDeletionTime {
    fn stamp_deleted_at(&mut self, at: Self::Time) {
        self.set_deleted_at(at);
        self.mark_deleted();
    }

    fn stamp_deleted_now(&mut self) {
        self.stamp_deleted_at(<Self::Time as Timestamp>::now());
    }
}

impl<T: HasDeletionTime + ?Sized> DeletionTimeExt for T {}

pub trait DeleterIdExt<K>: HasDeleterId<K> {
    fn stamp_deleted_by(&mut self, actor: K) {
        self.set_deleted_by(actor);
        self.mark_deleted();
    }
}

impl<K, T: HasDeleterId<K> + ?Sized> DeleterIdExt<K> for T {}

pub trait DeletionAuditExt<K>: HasDeletionTime + HasDeleterId<K> {
    fn stamp_deleted(&mut self, actor: K, at: <Self as HasDeletionTime>::Time) {
        self.set_deleted_at(at);
        self.set_deleted_by(actor);
        self.mark_deleted();
    }

    fn stamp_deleted_now_by(&mut self, actor: K) {
        self.stamp_deleted(actor, <<Self as HasDeletionTime>::Time as Timestamp>::now());
    }
}

impl<K, T: HasDeletionTime + HasDeleterId<K> + ?Sized> DeletionAuditExt<K> for T {}
