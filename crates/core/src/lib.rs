//! `auditkit-core`: audit capability model and dispatch.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the capability traits a domain object opts into, the timestamp model those
//! capabilities are expressed in, and the helper that probes an object at
//! runtime and stamps whichever audit fields it actually has.

pub mod capability;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod id;
pub mod time;

mod macros;

pub use capability::{
    AuditKind, Auditable, AuditableEntity, AuditableWithActors, CreationAudited,
    CreationAuditedWithCreator, CreationTime, DeletionAudited, DeletionAuditedWithDeleter,
    DeletionTime, HasCreationTime, HasCreator, HasCreatorId, HasDeleter, HasDeleterId,
    HasDeletionTime, HasModificationTime, HasModifier, HasModifierId, ModificationAudited,
    ModificationAuditedWithModifier, ModificationTime, SoftDeletable, Timestamped,
};
pub use dispatch::{
    AuditKindExt, AuditOutcome, Transition, apply_audit, apply_audit_by, apply_audit_by_at,
    apply_audit_with,
};
pub use entity::Entity;
pub use error::{AuditError, AuditResult};
pub use id::{ActorKey, EntityId, UserId};
pub use time::{AuditTime, InstantTime, OffsetTime, Timestamp, TimestampKind};
