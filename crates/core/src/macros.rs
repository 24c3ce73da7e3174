//! Declarative helpers for wiring a type's capabilities into [`AuditKind`].
//!
//! [`AuditKind`]: crate::capability::AuditKind

/// Implement [`AuditKind`](crate::capability::AuditKind) for a type by listing
/// the capabilities it implements.
///
/// ```ignore
/// audit_capabilities!(Invoice, i64 => [
///     creation_time,
///     creator_id,
///     soft_deletable,
///     deletion_time,
/// ]);
/// ```
///
/// Accepted names: `creation_time`, `creator_id`, `modification_time`,
/// `modifier_id`, `soft_deletable`, `deletion_time`, `deleter_id`. Each one
/// requires the matching capability trait to be implemented. Listing
/// `deletion_time` or `deleter_id` is enough for soft deletion.
#[macro_export]
macro_rules! audit_capabilities {
    ($ty:ty, $key:ty => [$($capability:ident),* $(,)?]) => {
        impl $crate::capability::AuditKind<$key> for $ty {
            $( $crate::__audit_probe!($capability, $key); )*
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __audit_probe {
    (creation_time, $key:ty) => {
        fn creation_time(&mut self) -> Option<$crate::capability::CreationTime<'_>> {
            Some($crate::capability::CreationTime::of(self))
        }
    };
    (creator_id, $key:ty) => {
        fn creator_id(&mut self) -> Option<&mut dyn $crate::capability::HasCreatorId<$key>> {
            Some(self)
        }
    };
    (modification_time, $key:ty) => {
        fn modification_time(&mut self) -> Option<$crate::capability::ModificationTime<'_>> {
            Some($crate::capability::ModificationTime::of(self))
        }
    };
    (modifier_id, $key:ty) => {
        fn modifier_id(&mut self) -> Option<&mut dyn $crate::capability::HasModifierId<$key>> {
            Some(self)
        }
    };
    (soft_deletable, $key:ty) => {
        fn soft_deletable(&mut self) -> Option<&mut dyn $crate::capability::SoftDeletable> {
            Some(self)
        }
    };
    (deletion_time, $key:ty) => {
        fn deletion_time(&mut self) -> Option<$crate::capability::DeletionTime<'_>> {
            Some($crate::capability::DeletionTime::of(self))
        }
    };
    (deleter_id, $key:ty) => {
        fn deleter_id(&mut self) -> Option<&mut dyn $crate::capability::HasDeleterId<$key>> {
            Some(self)
        }
    };
}
