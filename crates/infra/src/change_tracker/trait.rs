use serde::{Deserialize, Serialize};

use auditkit_core::{AuditError, AuditKind, Transition};

/// Pending-write state of a tracked object, as computed by the host.
///
/// Only `Added`, `Modified` and `Deleted` carry a write to audit. The adapter
/// reads this tag and may rewrite `Deleted` to `Modified`; it never introduces
/// any other value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityState {
    /// Not tracked by the unit of work.
    Detached,
    /// Tracked, nothing to write.
    Unchanged,
    /// Will be inserted on the next flush.
    Added,
    /// Will be updated on the next flush.
    Modified,
    /// Will be physically removed on the next flush.
    Deleted,
}

impl EntityState {
    /// Whether the next flush writes anything for this entry.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Added | Self::Modified | Self::Deleted)
    }
}

impl TryFrom<EntityState> for Transition {
    type Error = AuditError;

    fn try_from(state: EntityState) -> Result<Self, Self::Error> {
        match state {
            EntityState::Added => Ok(Transition::Insert),
            EntityState::Modified => Ok(Transition::Update),
            EntityState::Deleted => Ok(Transition::Delete),
            EntityState::Detached | EntityState::Unchanged => {
                Err(AuditError::not_auditable(format!("{state:?}")))
            }
        }
    }
}

impl From<Transition> for EntityState {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Insert => Self::Added,
            Transition::Update => Self::Modified,
            Transition::Delete => Self::Deleted,
        }
    }
}

/// A host object that may or may not carry audit capabilities.
///
/// Objects that implement [`AuditKind`] return themselves; everything else
/// returns `None` and is skipped by the adapter.
pub trait Tracked<K> {
    fn as_auditable(&mut self) -> Option<&mut dyn AuditKind<K>>;
}

impl<K, T: Tracked<K> + ?Sized> Tracked<K> for Box<T> {
    fn as_auditable(&mut self) -> Option<&mut dyn AuditKind<K>> {
        (**self).as_auditable()
    }
}

/// One entry of the host's change-tracking list.
///
/// ## Contract
///
/// - `state()` returns the pending-write tag computed by the host.
/// - `set_state()` is only ever called by the adapter to turn a soft-deleted
///   entry's `Deleted` into `Modified`.
/// - `auditable()` exposes the tracked object through the umbrella audit
///   marker, or `None` when the object has no audit capabilities at all.
pub trait TrackedEntry<K> {
    fn state(&self) -> EntityState;

    fn set_state(&mut self, state: EntityState);

    fn auditable(&mut self) -> Option<&mut dyn AuditKind<K>>;
}

impl<K, E: TrackedEntry<K> + ?Sized> TrackedEntry<K> for &mut E {
    fn state(&self) -> EntityState {
        (**self).state()
    }

    fn set_state(&mut self, state: EntityState) {
        (**self).set_state(state)
    }

    fn auditable(&mut self) -> Option<&mut dyn AuditKind<K>> {
        (**self).auditable()
    }
}

/// The host's unit-of-work change tracker.
///
/// ## Design Principles
///
/// - **Read-mostly**: the adapter only reads states and objects, and rewrites
///   at most one tag per entry per flush (`Deleted` → `Modified`).
/// - **No ownership**: the adapter never keeps a reference to an entry past
///   the call.
/// - **No filtering contract**: implementations yield every tracked entry;
///   filtering to pending, auditable entries is the adapter's job.
pub trait ChangeTracker<K> {
    type Entry: TrackedEntry<K> + 'static;

    /// Every tracked entry, in tracking order.
    fn entries_mut(&mut self) -> impl Iterator<Item = &mut Self::Entry>;
}
