//! Audit dispatch: probe an object's capabilities and stamp the matching fields.
//!
//! Nothing here fails. An absent capability is reported as `false` and the
//! remaining steps still run.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capability::AuditKind;
use crate::time::{AuditTime, TimestampKind};

/// Pending-write intent for an object in the current unit of work.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    Insert,
    Update,
    Delete,
}

/// Which dispatch steps found their capability and assigned a field.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AuditOutcome {
    /// The transition's timestamp field was assigned.
    pub time: bool,
    /// The transition's actor-id field was assigned.
    pub actor: bool,
    /// The soft-delete flag was raised (delete transitions only).
    pub soft_deleted: bool,
}

impl AuditOutcome {
    /// No field was touched.
    pub fn is_noop(&self) -> bool {
        !(self.time || self.actor || self.soft_deleted)
    }
}

fn report_mismatch(
    field: &'static str,
    declared: TimestampKind,
    at: Option<AuditTime>,
    applied: bool,
) -> bool {
    if let (false, Some(at)) = (applied, at) {
        debug!(
            field,
            ?declared,
            supplied = ?at.kind(),
            "timestamp representation mismatch; field left unchanged"
        );
    }
    applied
}

/// Individual dispatch steps, available on anything implementing [`AuditKind`].
///
/// Each step returns whether the capability was present and the field set.
/// Time steps stamp "now" when `at` is `None`; with an explicit `at` they only
/// assign fields declared in the same representation.
pub trait AuditKindExt<K>: AuditKind<K> {
    fn try_apply_creation_time(&mut self, at: Option<AuditTime>) -> bool {
        match self.creation_time() {
            Some(field) => {
                let declared = field.kind();
                report_mismatch("created_at", declared, at, field.assign(at))
            }
            None => false,
        }
    }

    fn try_apply_creator_id(&mut self, actor: K) -> bool {
        match self.creator_id() {
            Some(field) => {
                field.set_created_by(actor);
                true
            }
            None => false,
        }
    }

    fn try_apply_modification_time(&mut self, at: Option<AuditTime>) -> bool {
        match self.modification_time() {
            Some(field) => {
                let declared = field.kind();
                report_mismatch("modified_at", declared, at, field.assign(at))
            }
            None => false,
        }
    }

    fn try_apply_modifier_id(&mut self, actor: K) -> bool {
        match self.modifier_id() {
            Some(field) => {
                field.set_modified_by(actor);
                true
            }
            None => false,
        }
    }

    /// Raise the soft-delete flag. Deletion time and deleter id imply the
    /// flag, so their probes are used when `soft_deletable` is absent.
    fn try_apply_soft_delete(&mut self) -> bool {
        if let Some(flag) = self.soft_deletable() {
            flag.set_deleted(true);
            return true;
        }
        if let Some(mut field) = self.deletion_time() {
            field.mark_deleted();
            return true;
        }
        if let Some(field) = self.deleter_id() {
            field.set_deleted(true);
            return true;
        }
        false
    }

    fn try_apply_deletion_time(&mut self, at: Option<AuditTime>) -> bool {
        match self.deletion_time() {
            Some(field) => {
                let declared = field.kind();
                report_mismatch("deleted_at", declared, at, field.assign(at))
            }
            None => false,
        }
    }

    fn try_apply_deleter_id(&mut self, actor: K) -> bool {
        match self.deleter_id() {
            Some(field) => {
                field.set_deleted_by(actor);
                true
            }
            None => false,
        }
    }
}

impl<K, A: AuditKind<K> + ?Sized> AuditKindExt<K> for A {}

/// Stamp audit fields for `transition` using the current UTC time, no actor.
pub fn apply_audit<K, A>(object: &mut A, transition: Transition) -> AuditOutcome
where
    A: AuditKind<K> + ?Sized,
{
    apply_audit_with(object, transition, None, None)
}

/// Stamp audit fields for `transition` using the current UTC time and `actor`.
pub fn apply_audit_by<K, A>(object: &mut A, transition: Transition, actor: K) -> AuditOutcome
where
    A: AuditKind<K> + ?Sized,
{
    apply_audit_with(object, transition, Some(actor), None)
}

/// Stamp audit fields for `transition` with an explicit actor and timestamp.
///
/// Re-invoking with the same arguments leaves the object in the same state.
pub fn apply_audit_by_at<K, A>(
    object: &mut A,
    transition: Transition,
    actor: K,
    at: impl Into<AuditTime>,
) -> AuditOutcome
where
    A: AuditKind<K> + ?Sized,
{
    apply_audit_with(object, transition, Some(actor), Some(at.into()))
}

/// Stamp audit fields for `transition`.
///
/// - **Insert**: creation time, then creator id when an actor is given.
/// - **Update**: modification time, then modifier id when an actor is given.
/// - **Delete**: only for soft-deletable objects. Raises the flag, then sets
///   deletion time and, when an actor is given, deleter id. Objects without the
///   soft-delete capability are left untouched so the host deletes them
///   physically.
pub fn apply_audit_with<K, A>(
    object: &mut A,
    transition: Transition,
    actor: Option<K>,
    at: Option<AuditTime>,
) -> AuditOutcome
where
    A: AuditKind<K> + ?Sized,
{
    let mut outcome = AuditOutcome::default();

    match transition {
        Transition::Insert => {
            outcome.time = AuditKindExt::<K>::try_apply_creation_time(object, at);
            if let Some(actor) = actor {
                outcome.actor = AuditKindExt::<K>::try_apply_creator_id(object, actor);
            }
        }
        Transition::Update => {
            outcome.time = AuditKindExt::<K>::try_apply_modification_time(object, at);
            if let Some(actor) = actor {
                outcome.actor = AuditKindExt::<K>::try_apply_modifier_id(object, actor);
            }
        }
        Transition::Delete => {
            if !AuditKindExt::<K>::try_apply_soft_delete(object) {
                return outcome;
            }
            outcome.soft_deleted = true;
            outcome.time = AuditKindExt::<K>::try_apply_deletion_time(object, at);
            if let Some(actor) = actor {
                outcome.actor = AuditKindExt::<K>::try_apply_deleter_id(object, actor);
            }
        }
    }

    outcome
}
