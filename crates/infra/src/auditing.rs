//! Auditing adapter: stamp audit fields across a change tracker before flush.

use tracing::debug;

use auditkit_core::{ActorKey, AuditTime, Transition, apply_audit_with};

use crate::change_tracker::{ChangeTracker, EntityState, TrackedEntry};

/// Auditing adapter configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditConfig<K> {
    /// Actor stamped into creator/modifier/deleter ids.
    pub performed_by: Option<K>,
    /// Explicit timestamp; the current UTC time when `None`.
    pub performed_at: Option<AuditTime>,
    /// Turn deletes of soft-deletable objects into updates.
    pub soft_delete: bool,
}

impl<K> Default for AuditConfig<K> {
    fn default() -> Self {
        Self {
            performed_by: None,
            performed_at: None,
            soft_delete: true,
        }
    }
}

impl<K> AuditConfig<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(mut self, actor: K) -> Self {
        self.performed_by = Some(actor);
        self
    }

    pub fn with_timestamp(mut self, at: impl Into<AuditTime>) -> Self {
        self.performed_at = Some(at.into());
        self
    }

    pub fn with_soft_delete(mut self, enabled: bool) -> Self {
        self.soft_delete = enabled;
        self
    }
}

/// What one adapter run did.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub inserted: usize,
    pub updated: usize,
    /// Deletes rewritten to updates.
    pub soft_deleted: usize,
    /// Deletes left for physical removal.
    pub hard_deleted: usize,
    /// Idle entries and entries without audit capabilities.
    pub skipped: usize,
}

impl AuditSummary {
    pub fn audited(&self) -> usize {
        self.inserted + self.updated + self.soft_deleted + self.hard_deleted
    }
}

fn audit_entry<K, E>(entry: &mut E, config: &AuditConfig<K>, summary: &mut AuditSummary)
where
    K: ActorKey,
    E: TrackedEntry<K> + ?Sized,
{
    let Ok(transition) = Transition::try_from(entry.state()) else {
        summary.skipped += 1;
        return;
    };
    let Some(object) = entry.auditable() else {
        summary.skipped += 1;
        return;
    };

    if transition == Transition::Delete && !config.soft_delete {
        summary.hard_deleted += 1;
        return;
    }

    let outcome = apply_audit_with(
        object,
        transition,
        config.performed_by.clone(),
        config.performed_at,
    );
    debug!(?transition, ?outcome, "audit fields applied");

    match transition {
        Transition::Insert => summary.inserted += 1,
        Transition::Update => summary.updated += 1,
        Transition::Delete if outcome.soft_deleted => {
            entry.set_state(EntityState::Modified);
            summary.soft_deleted += 1;
        }
        Transition::Delete => summary.hard_deleted += 1,
    }
}

/// Auditing entry points on any [`ChangeTracker`].
///
/// For every entry whose object carries audit capabilities and whose state
/// is `Added`, `Modified` or `Deleted`:
///
/// 1. the state is mapped to a [`Transition`],
/// 2. the audit fields are stamped (see [`apply_audit_with`]),
/// 3. a `Deleted` entry whose object turned out to be soft-deletable is
///    rewritten to `Modified`, so the host issues an update instead of a
///    physical removal. `Added` and `Modified` are never rewritten.
pub trait AuditChangeTracker<K: ActorKey>: ChangeTracker<K> {
    /// Stamp with the current UTC time and no actor.
    fn apply_auditing(&mut self) -> AuditSummary {
        self.apply_auditing_with(&AuditConfig::default())
    }

    /// Stamp with the current UTC time and `actor`.
    fn apply_auditing_by(&mut self, actor: K) -> AuditSummary {
        self.apply_auditing_with(&AuditConfig::new().with_actor(actor))
    }

    /// Stamp with an explicit actor and timestamp.
    fn apply_auditing_by_at(&mut self, actor: K, at: impl Into<AuditTime>) -> AuditSummary {
        self.apply_auditing_with(&AuditConfig::new().with_actor(actor).with_timestamp(at))
    }

    fn apply_auditing_with(&mut self, config: &AuditConfig<K>) -> AuditSummary {
        let mut summary = AuditSummary::default();
        for entry in self.entries_mut() {
            audit_entry(entry, config, &mut summary);
        }
        debug!(
            inserted = summary.inserted,
            updated = summary.updated,
            soft_deleted = summary.soft_deleted,
            hard_deleted = summary.hard_deleted,
            skipped = summary.skipped,
            "change tracker audited"
        );
        summary
    }
}

impl<K: ActorKey, C: ChangeTracker<K> + ?Sized> AuditChangeTracker<K> for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_tracker::{Tracked, UnitOfWork};
    use auditkit_core::{AuditKind, HasCreationTime, InstantTime, SoftDeletable};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Draft {
        created_at: Option<InstantTime>,
        is_deleted: bool,
    }

    impl HasCreationTime for Draft {
        type Time = InstantTime;

        fn created_at(&self) -> Option<InstantTime> {
            self.created_at
        }

        fn set_created_at(&mut self, at: InstantTime) {
            self.created_at = Some(at);
        }
    }

    impl SoftDeletable for Draft {
        fn is_deleted(&self) -> bool {
            self.is_deleted
        }

        fn set_deleted(&mut self, deleted: bool) {
            self.is_deleted = deleted;
        }
    }

    auditkit_core::audit_capabilities!(Draft, i64 => [creation_time, soft_deletable]);

    impl Tracked<i64> for Draft {
        fn as_auditable(&mut self) -> Option<&mut dyn AuditKind<i64>> {
            Some(self)
        }
    }

    fn test_time() -> InstantTime {
        Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap()
    }

    #[test]
    fn config_defaults_to_soft_delete_without_actor() {
        let config = AuditConfig::<i64>::default();
        assert!(config.soft_delete);
        assert_eq!(config.performed_by, None);
        assert_eq!(config.performed_at, None);
    }

    #[test]
    fn disabling_soft_delete_leaves_deletes_physical() {
        let mut uow = UnitOfWork::new();
        let idx = uow.track(Draft::default(), EntityState::Deleted);

        let config = AuditConfig::<i64>::new().with_soft_delete(false);
        let summary = uow.apply_auditing_with(&config);

        assert_eq!(summary.hard_deleted, 1);
        let entry = uow.get(idx).unwrap();
        assert_eq!(entry.state(), EntityState::Deleted);
        assert!(!entry.entity().is_deleted);
    }

    #[test]
    fn idle_entries_are_skipped() {
        let mut uow = UnitOfWork::new();
        let idx = uow.attach(Draft::default());

        let summary = uow.apply_auditing_by_at(1_i64, test_time());

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.audited(), 0);
        assert_eq!(uow.get(idx).unwrap().entity(), &Draft::default());
    }

    #[test]
    fn insert_is_stamped_and_keeps_its_state() {
        let mut uow = UnitOfWork::new();
        let idx = uow.add(Draft::default());

        let summary = uow.apply_auditing_by_at(1_i64, test_time());

        assert_eq!(summary.inserted, 1);
        let entry = uow.get(idx).unwrap();
        assert_eq!(entry.state(), EntityState::Added);
        assert_eq!(entry.entity().created_at, Some(test_time()));
    }

    fn state_strategy() -> impl Strategy<Value = EntityState> {
        prop_oneof![
            Just(EntityState::Detached),
            Just(EntityState::Unchanged),
            Just(EntityState::Added),
            Just(EntityState::Modified),
            Just(EntityState::Deleted),
        ]
    }

    proptest! {
        /// Property: only soft-deleted entries change state; inserts and
        /// updates keep theirs for any mix of pending states.
        #[test]
        fn only_soft_deletes_are_rewritten(
            states in prop::collection::vec(state_strategy(), 0..32),
            actor in any::<i64>(),
        ) {
            let mut uow = UnitOfWork::new();
            for state in &states {
                uow.track(Draft::default(), *state);
            }

            let summary = uow.apply_auditing_by_at(actor, test_time());

            let count = |wanted: EntityState| states.iter().filter(|s| **s == wanted).count();
            prop_assert_eq!(summary.inserted, count(EntityState::Added));
            prop_assert_eq!(summary.updated, count(EntityState::Modified));
            prop_assert_eq!(summary.soft_deleted, count(EntityState::Deleted));
            prop_assert_eq!(summary.hard_deleted, 0);
            prop_assert_eq!(
                summary.skipped,
                count(EntityState::Unchanged) + count(EntityState::Detached)
            );

            for (entry, before) in uow.entries().iter().zip(&states) {
                let expected = match before {
                    EntityState::Deleted => EntityState::Modified,
                    other => *other,
                };
                prop_assert_eq!(entry.state(), expected);
                prop_assert_eq!(entry.entity().is_deleted, *before == EntityState::Deleted);
            }
        }
    }
}
