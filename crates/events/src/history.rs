use crate::event::{EventRecord, EventState};

/// An object that owns a log of audit records about itself.
///
/// The collection is a log: it is appended to, never re-sorted or
/// de-duplicated here.
pub trait HasEventHistory {
    type Record: EventRecord;

    fn event_history(&self) -> &[Self::Record];

    fn event_history_mut(&mut self) -> &mut Vec<Self::Record>;

    fn append_event(&mut self, record: Self::Record) {
        self.event_history_mut().push(record);
    }

    /// Most recently appended record.
    fn latest_event(&self) -> Option<&Self::Record> {
        self.event_history().last()
    }

    fn events_in_state(&self, state: EventState) -> impl Iterator<Item = &Self::Record> {
        self.event_history()
            .iter()
            .filter(move |record| record.event_state() == state)
    }
}
