//! Capability model.
//!
//! Each capability is an independent trait with one field (or one field plus a
//! navigation reference). A domain type implements any subset of them à la
//! carte; the composite shapes below are blanket-implemented groupings, not
//! separate runtime types.
//!
//! Runtime discovery goes through [`AuditKind`]: every probe defaults to
//! "absent", and a type overrides the probes for the capabilities it has
//! (usually via [`audit_capabilities!`](crate::audit_capabilities)).

pub mod creation;
pub mod deletion;
pub mod modification;

pub use creation::{CreationAuditExt, CreationTimeExt, HasCreationTime, HasCreator, HasCreatorId};
pub use deletion::{
    DeleterIdExt, DeletionAuditExt, DeletionTimeExt, HasDeleter, HasDeleterId, HasDeletionTime,
    SoftDeletable,
};
pub use modification::{
    HasModificationTime, HasModifier, HasModifierId, ModificationAuditExt, ModificationTimeExt,
};

use crate::entity::Entity;
use crate::id::UserId;
use crate::time::{AuditTime, InstantTime, OffsetTime, Timestamp, TimestampKind};

/// Umbrella audit marker with one probe per capability.
///
/// `K` is the actor identifier type shared by the creator/modifier/deleter
/// capabilities. Time probes return an enum tagged with the representation the
/// object declared, so a field can never be exposed in both.
///
/// Deletion time and deleter id both imply soft deletion, so dispatch can raise
/// the flag through either of those probes when `soft_deletable` is not listed.
pub trait AuditKind<K = UserId> {
    fn creation_time(&mut self) -> Option<CreationTime<'_>> {
        None
    }

    fn creator_id(&mut self) -> Option<&mut dyn HasCreatorId<K>> {
        None
    }

    fn modification_time(&mut self) -> Option<ModificationTime<'_>> {
        None
    }

    fn modifier_id(&mut self) -> Option<&mut dyn HasModifierId<K>> {
        None
    }

    fn soft_deletable(&mut self) -> Option<&mut dyn SoftDeletable> {
        None
    }

    fn deletion_time(&mut self) -> Option<DeletionTime<'_>> {
        None
    }

    fn deleter_id(&mut self) -> Option<&mut dyn HasDeleterId<K>> {
        None
    }
}

macro_rules! time_probe {
    ($(#[$meta:meta])* $probe:ident, $capability:ident, $wrap:ident, $setter:ident) => {
        $(#[$meta])*
        pub enum $probe<'a> {
            Instant(&'a mut dyn $capability<Time = InstantTime>),
            Offset(&'a mut dyn $capability<Time = OffsetTime>),
        }

        impl<'a> $probe<'a> {
            /// Wrap a capability in the variant matching its declared representation.
            pub fn of<C>(capability: &'a mut C) -> Self
            where
                C: $capability + 'a,
            {
                <<C as $capability>::Time as Timestamp>::$wrap(capability)
            }

            pub fn kind(&self) -> TimestampKind {
                match self {
                    Self::Instant(_) => TimestampKind::Instant,
                    Self::Offset(_) => TimestampKind::Offset,
                }
            }

            /// Assign `at`, or the current time in the field's representation when
            /// `at` is `None`.
            ///
            /// Returns `false` and leaves the field untouched when `at` uses the
            /// other representation.
            pub fn assign(self, at: Option<AuditTime>) -> bool {
                let at = at.unwrap_or_else(|| AuditTime::now(self.kind()));
                match (self, at) {
                    (Self::Instant(field), AuditTime::Instant(t)) => {
                        field.$setter(t);
                        true
                    }
                    (Self::Offset(field), AuditTime::Offset(t)) => {
                        field.$setter(t);
                        true
                    }
                    _ => false,
                }
            }
        }

        impl core::fmt::Debug for $probe<'_> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_tuple(stringify!($probe)).field(&self.kind()).finish()
            }
        }
    };
}

time_probe!(
    /// Runtime view of an object's creation-time field.
    CreationTime,
    HasCreationTime,
    creation_probe,
    set_created_at
);

time_probe!(
    /// Runtime view of an object's modification-time field.
    ModificationTime,
    HasModificationTime,
    modification_probe,
    set_modified_at
);

time_probe!(
    /// Runtime view of an object's deletion-time field.
    DeletionTime,
    HasDeletionTime,
    deletion_probe,
    set_deleted_at
);

impl DeletionTime<'_> {
    /// Raise the soft-delete flag the deletion-time capability implies.
    pub fn mark_deleted(&mut self) {
        match self {
            Self::Instant(field) => field.set_deleted(true),
            Self::Offset(field) => field.set_deleted(true),
        }
    }
}

/// Creation time + creator id.
pub trait CreationAudited<K>: HasCreationTime + HasCreatorId<K> {}

impl<K, T: HasCreationTime + HasCreatorId<K> + ?Sized> CreationAudited<K> for T {}

/// Creation time + creator id + creator reference.
pub trait CreationAuditedWithCreator<K>: CreationAudited<K> + HasCreator<K> {}

impl<K, T: CreationAudited<K> + HasCreator<K> + ?Sized> CreationAuditedWithCreator<K> for T {}

/// Modification time + modifier id.
pub trait ModificationAudited<K>: HasModificationTime + HasModifierId<K> {}

impl<K, T: HasModificationTime + HasModifierId<K> + ?Sized> ModificationAudited<K> for T {}

pub trait ModificationAuditedWithModifier<K>: ModificationAudited<K> + HasModifier<K> {}

impl<K, T: ModificationAudited<K> + HasModifier<K> + ?Sized> ModificationAuditedWithModifier<K>
    for T
{
}

/// Soft-delete flag + deletion time + deleter id.
pub trait DeletionAudited<K>: HasDeletionTime + HasDeleterId<K> {}

impl<K, T: HasDeletionTime + HasDeleterId<K> + ?Sized> DeletionAudited<K> for T {}

pub trait DeletionAuditedWithDeleter<K>: DeletionAudited<K> + HasDeleter<K> {}

impl<K, T: DeletionAudited<K> + HasDeleter<K> + ?Sized> DeletionAuditedWithDeleter<K> for T {}

/// All three timestamps, in one representation.
pub trait Timestamped<T: Timestamp>:
    HasCreationTime<Time = T> + HasModificationTime<Time = T> + HasDeletionTime<Time = T>
{
}

impl<T, X> Timestamped<T> for X
where
    T: Timestamp,
    X: HasCreationTime<Time = T>
        + HasModificationTime<Time = T>
        + HasDeletionTime<Time = T>
        + ?Sized,
{
}

/// Every timestamp and actor id.
pub trait Auditable<K, T: Timestamp>:
    Timestamped<T> + CreationAudited<K> + ModificationAudited<K> + DeletionAudited<K>
{
}

impl<K, T, X> Auditable<K, T> for X
where
    T: Timestamp,
    X: Timestamped<T> + CreationAudited<K> + ModificationAudited<K> + DeletionAudited<K> + ?Sized,
{
}

/// Every timestamp, actor id and actor reference.
pub trait AuditableWithActors<K, T: Timestamp>:
    Auditable<K, T> + HasCreator<K> + HasModifier<K> + HasDeleter<K>
{
}

impl<K, T, X> AuditableWithActors<K, T> for X
where
    T: Timestamp,
    X: Auditable<K, T> + HasCreator<K> + HasModifier<K> + HasDeleter<K> + ?Sized,
{
}

/// An entity keyed by the same identifier type as its actors, fully audited.
pub trait AuditableEntity<K, T: Timestamp>: Entity<Id = K> + Auditable<K, T> {}

impl<K, T, X> AuditableEntity<K, T> for X
where
    T: Timestamp,
    X: Entity<Id = K> + Auditable<K, T> + ?Sized,
{
}
