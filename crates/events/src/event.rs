use core::str::FromStr;

use serde::{Deserialize, Serialize};

use auditkit_core::capability::{CreationTimeExt, HasCreator, HasCreatorId};
use auditkit_core::{AuditError, AuditResult, Entity, HasCreationTime, InstantTime, Transition};

/// What happened to the originating entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventState {
    Created = 1,
    Updated = 2,
    Deleted = 3,
}

impl EventState {
    /// Stable numeric code (as stored by relational hosts).
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::Deleted => "Deleted",
        }
    }
}

impl core::fmt::Display for EventState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for EventState {
    type Error = AuditError;

    fn try_from(code: i32) -> AuditResult<Self> {
        match code {
            1 => Ok(Self::Created),
            2 => Ok(Self::Updated),
            3 => Ok(Self::Deleted),
            other => Err(AuditError::unknown_event_state(other.to_string())),
        }
    }
}

impl FromStr for EventState {
    type Err = AuditError;

    fn from_str(s: &str) -> AuditResult<Self> {
        match s {
            "Created" => Ok(Self::Created),
            "Updated" => Ok(Self::Updated),
            "Deleted" => Ok(Self::Deleted),
            other => Err(AuditError::unknown_event_state(other)),
        }
    }
}

impl From<Transition> for EventState {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Insert => Self::Created,
            Transition::Update => Self::Updated,
            Transition::Delete => Self::Deleted,
        }
    }
}

/// An append-only audit record.
///
/// Records are:
/// - **immutable** once appended (the setters exist to fill a fresh record)
/// - stamped with their own creation time, as a bare UTC instant
/// - carriers of a serialized snapshot in `payload`, format chosen by the host
pub trait EventRecord: HasCreationTime<Time = InstantTime> {
    fn event_state(&self) -> EventState;

    fn set_event_state(&mut self, state: EventState);

    fn payload(&self) -> &str;

    fn set_payload(&mut self, payload: String);
}

/// Fill helpers for fresh records.
pub trait EventRecordExt: EventRecord {
    /// Set state and payload, stamping the creation time with "now".
    fn record(&mut self, state: EventState, payload: impl Into<String>) {
        self.set_event_state(state);
        self.set_payload(payload.into());
        self.stamp_created_now();
    }

    fn record_at(&mut self, state: EventState, payload: impl Into<String>, at: InstantTime) {
        self.set_event_state(state);
        self.set_payload(payload.into());
        self.set_created_at(at);
    }
}

impl<R: EventRecord + ?Sized> EventRecordExt for R {}

/// A record with its own identity and a back-reference to the entity it describes.
pub trait EntityEventRecord<E: Entity>: EventRecord + Entity {
    fn entity(&self) -> Option<&E>;

    fn set_entity(&mut self, entity: E);
}

/// Entity-linked record that also names the actor who produced it.
pub trait AuditedEventRecord<E: Entity, K>: EntityEventRecord<E> + HasCreatorId<K> {}

impl<E, K, R> AuditedEventRecord<E, K> for R
where
    E: Entity,
    R: EntityEventRecord<E> + HasCreatorId<K> + ?Sized,
{
}

/// Entity-linked record carrying the producing actor's id and reference.
pub trait AuditedEventRecordWithCreator<E: Entity, K>:
    EntityEventRecord<E> + HasCreator<K>
{
}

impl<E, K, R> AuditedEventRecordWithCreator<E, K> for R
where
    E: Entity,
    R: EntityEventRecord<E> + HasCreator<K> + ?Sized,
{
}
