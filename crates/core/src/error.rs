//! Audit error model.

use thiserror::Error;

/// Result type used across the audit crates.
pub type AuditResult<T> = Result<T, AuditError>;

/// Audit-level error.
///
/// A missing capability is never an error: dispatch reports it as a `false`
/// applicability flag. Errors only come out of conversions between the audit
/// vocabulary and external representations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A tracked-entry state carries no pending write to audit.
    #[error("no audit transition for entity state: {0}")]
    NotAuditable(String),

    /// An event-state code or name was not recognised.
    #[error("unknown event state: {0}")]
    UnknownEventState(String),
}

impl AuditError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_auditable(msg: impl Into<String>) -> Self {
        Self::NotAuditable(msg.into())
    }

    pub fn unknown_event_state(msg: impl Into<String>) -> Self {
        Self::UnknownEventState(msg.into())
    }
}
