//! Change-tracking boundary.
//!
//! This module defines the host-facing seam the auditing adapter reads from:
//! a list of tracked entries, each with an object and a pending-write state.
//! It makes no assumption about how the host computes those states.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{EntityEntry, UnitOfWork};
pub use r#trait::{ChangeTracker, EntityState, Tracked, TrackedEntry};
