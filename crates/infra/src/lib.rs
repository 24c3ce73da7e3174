//! Infrastructure layer: change-tracker seam and the auditing adapter.

pub mod auditing;
pub mod change_tracker;


pub use auditing::{AuditChangeTracker, AuditConfig, AuditSummary};
pub use change_tracker::{ChangeTracker, EntityEntry, EntityState, Tracked, TrackedEntry, UnitOfWork};
