//! Event-store shapes for append-only audit logs.
//!
//! These are data-shape declarations only: an external consumer fills records
//! in and persists them. Nothing here serializes, orders or stores events.

pub mod event;
pub mod history;

pub use event::{
    AuditedEventRecord, AuditedEventRecordWithCreator, EntityEventRecord, EventRecord,
    EventRecordExt, EventState,
};
pub use history::HasEventHistory;
