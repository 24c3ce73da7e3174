use auditkit_core::{AuditKind, Transition};

use super::r#trait::{ChangeTracker, EntityState, Tracked, TrackedEntry};

/// A tracked object plus its pending-write state.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityEntry<O> {
    entity: O,
    state: EntityState,
}

impl<O> EntityEntry<O> {
    pub fn new(entity: O, state: EntityState) -> Self {
        Self { entity, state }
    }

    pub fn entity(&self) -> &O {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut O {
        &mut self.entity
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    pub fn into_entity(self) -> O {
        self.entity
    }
}

impl<K, O: Tracked<K>> TrackedEntry<K> for EntityEntry<O> {
    fn state(&self) -> EntityState {
        self.state
    }

    fn set_state(&mut self, state: EntityState) {
        self.state = state;
    }

    fn auditable(&mut self) -> Option<&mut dyn AuditKind<K>> {
        self.entity.as_auditable()
    }
}

/// In-memory unit of work.
///
/// Intended for tests and for hosts without an ORM of their own. It tracks
/// objects in insertion order and computes the pending writes a flush would
/// issue; it never persists anything.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitOfWork<O> {
    entries: Vec<EntityEntry<O>>,
}

impl<O> Default for UnitOfWork<O> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<O> UnitOfWork<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `entity` with an explicit state. Returns its index.
    pub fn track(&mut self, entity: O, state: EntityState) -> usize {
        self.entries.push(EntityEntry::new(entity, state));
        self.entries.len() - 1
    }

    /// Track a new object to be inserted.
    pub fn add(&mut self, entity: O) -> usize {
        self.track(entity, EntityState::Added)
    }

    /// Track an already-persisted object with nothing to write.
    pub fn attach(&mut self, entity: O) -> usize {
        self.track(entity, EntityState::Unchanged)
    }

    /// Mark an entry as modified. Pending inserts stay inserts.
    ///
    /// Returns `false` when `index` is not tracked.
    pub fn update(&mut self, index: usize) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        if entry.state != EntityState::Added {
            entry.state = EntityState::Modified;
        }
        true
    }

    /// Mark an entry for deletion. A pending insert is simply detached.
    ///
    /// Returns `false` when `index` is not tracked.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        entry.state = match entry.state {
            EntityState::Added => EntityState::Detached,
            _ => EntityState::Deleted,
        };
        true
    }

    pub fn get(&self, index: usize) -> Option<&EntityEntry<O>> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut EntityEntry<O>> {
        self.entries.get_mut(index)
    }

    pub fn entries(&self) -> &[EntityEntry<O>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the next flush would issue, as `(index, transition)` pairs.
    pub fn pending(&self) -> Vec<(usize, Transition)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(idx, e)| Transition::try_from(e.state).ok().map(|t| (idx, t)))
            .collect()
    }

    /// Simulate a successful flush.
    ///
    /// Returns the writes that were issued (indices refer to the tracker
    /// before the flush). Deleted and detached entries are dropped; every
    /// remaining entry becomes `Unchanged`.
    pub fn accept_changes(&mut self) -> Vec<(usize, Transition)> {
        let written = self.pending();
        self.entries
            .retain(|e| !matches!(e.state, EntityState::Deleted | EntityState::Detached));
        for entry in &mut self.entries {
            entry.state = EntityState::Unchanged;
        }
        written
    }
}

impl<K, O: Tracked<K> + 'static> ChangeTracker<K> for UnitOfWork<O> {
    type Entry = EntityEntry<O>;

    fn entries_mut(&mut self) -> impl Iterator<Item = &mut EntityEntry<O>> {
        self.entries.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str);

    impl Tracked<i64> for Row {
        fn as_auditable(&mut self) -> Option<&mut dyn AuditKind<i64>> {
            None
        }
    }

    #[test]
    fn update_keeps_pending_inserts() {
        let mut uow = UnitOfWork::new();
        let added = uow.add(Row("new"));
        let attached = uow.attach(Row("old"));

        assert!(uow.update(added));
        assert!(uow.update(attached));
        assert!(!uow.update(99));

        assert_eq!(uow.get(added).unwrap().state(), EntityState::Added);
        assert_eq!(uow.get(attached).unwrap().state(), EntityState::Modified);
    }

    #[test]
    fn removing_a_pending_insert_detaches_it() {
        let mut uow = UnitOfWork::new();
        let added = uow.add(Row("new"));
        let attached = uow.attach(Row("old"));

        uow.remove(added);
        uow.remove(attached);

        assert_eq!(uow.get(added).unwrap().state(), EntityState::Detached);
        assert_eq!(uow.get(attached).unwrap().state(), EntityState::Deleted);
        assert_eq!(uow.pending(), vec![(attached, Transition::Delete)]);
    }

    #[test]
    fn accept_changes_drops_deleted_rows_and_resets_state() {
        let mut uow = UnitOfWork::new();
        uow.add(Row("a"));
        let b = uow.attach(Row("b"));
        let c = uow.attach(Row("c"));
        uow.update(b);
        uow.remove(c);

        let written = uow.accept_changes();

        assert_eq!(
            written,
            vec![
                (0, Transition::Insert),
                (1, Transition::Update),
                (2, Transition::Delete)
            ]
        );
        assert_eq!(uow.len(), 2);
        assert!(uow.entries().iter().all(|e| e.state() == EntityState::Unchanged));
        assert!(uow.pending().is_empty());
    }

    #[test]
    fn entries_mut_yields_every_entry_in_tracking_order() {
        let mut uow = UnitOfWork::new();
        uow.add(Row("a"));
        uow.attach(Row("b"));
        uow.track(Row("c"), EntityState::Deleted);

        let states: Vec<EntityState> = ChangeTracker::<i64>::entries_mut(&mut uow)
            .map(|e| e.state())
            .collect();
        assert_eq!(
            states,
            vec![EntityState::Added, EntityState::Unchanged, EntityState::Deleted]
        );

        for entry in ChangeTracker::<i64>::entries_mut(&mut uow) {
            assert!(TrackedEntry::<i64>::auditable(entry).is_none());
            TrackedEntry::<i64>::set_state(entry, EntityState::Unchanged);
        }
        assert!(uow.pending().is_empty());
    }

    #[test]
    fn idle_states_have_no_transition() {
        assert!(Transition::try_from(EntityState::Unchanged).is_err());
        assert!(Transition::try_from(EntityState::Detached).is_err());
        assert_eq!(
            Transition::try_from(EntityState::Deleted).unwrap(),
            Transition::Delete
        );
        assert!(!EntityState::Unchanged.is_pending());
    }
}
