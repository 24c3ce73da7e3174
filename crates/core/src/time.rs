//! Timestamp representations understood by the audit capabilities.
//!
//! Exactly two are supported: a bare UTC instant and an offset-aware instant.
//! A time capability declares one of them through its `Time` associated type,
//! so an object carries at most one representation per audited field.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::capability::{
    CreationTime, DeletionTime, HasCreationTime, HasDeletionTime, HasModificationTime,
    ModificationTime,
};

/// Bare instant, stored in UTC.
pub type InstantTime = DateTime<Utc>;

/// Offset-aware instant.
pub type OffsetTime = DateTime<FixedOffset>;

/// Which representation a timestamp field uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimestampKind {
    Instant,
    Offset,
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::InstantTime {}
    impl Sealed for super::OffsetTime {}
}

/// A supported timestamp representation.
///
/// Sealed: the dispatch helper probes a closed set of representations.
pub trait Timestamp:
    sealed::Sealed + Copy + PartialEq + core::fmt::Debug + Into<AuditTime> + 'static
{
    const KIND: TimestampKind;

    /// Current wall-clock time in this representation (UTC for offset-aware values).
    fn now() -> Self;

    #[doc(hidden)]
    fn creation_probe<'a, C>(capability: &'a mut C) -> CreationTime<'a>
    where
        C: HasCreationTime<Time = Self> + 'a;

    #[doc(hidden)]
    fn modification_probe<'a, C>(capability: &'a mut C) -> ModificationTime<'a>
    where
        C: HasModificationTime<Time = Self> + 'a;

    #[doc(hidden)]
    fn deletion_probe<'a, C>(capability: &'a mut C) -> DeletionTime<'a>
    where
        C: HasDeletionTime<Time = Self> + 'a;
}

impl Timestamp for InstantTime {
    const KIND: TimestampKind = TimestampKind::Instant;

    fn now() -> Self {
        Utc::now()
    }

    fn creation_probe<'a, C>(capability: &'a mut C) -> CreationTime<'a>
    where
        C: HasCreationTime<Time = Self> + 'a,
    {
        CreationTime::Instant(capability)
    }

    fn modification_probe<'a, C>(capability: &'a mut C) -> ModificationTime<'a>
    where
        C: HasModificationTime<Time = Self> + 'a,
    {
        ModificationTime::Instant(capability)
    }

    fn deletion_probe<'a, C>(capability: &'a mut C) -> DeletionTime<'a>
    where
        C: HasDeletionTime<Time = Self> + 'a,
    {
        DeletionTime::Instant(capability)
    }
}

impl Timestamp for OffsetTime {
    const KIND: TimestampKind = TimestampKind::Offset;

    fn now() -> Self {
        Utc::now().into()
    }

    fn creation_probe<'a, C>(capability: &'a mut C) -> CreationTime<'a>
    where
        C: HasCreationTime<Time = Self> + 'a,
    {
        CreationTime::Offset(capability)
    }

    fn modification_probe<'a, C>(capability: &'a mut C) -> ModificationTime<'a>
    where
        C: HasModificationTime<Time = Self> + 'a,
    {
        ModificationTime::Offset(capability)
    }

    fn deletion_probe<'a, C>(capability: &'a mut C) -> DeletionTime<'a>
    where
        C: HasDeletionTime<Time = Self> + 'a,
    {
        DeletionTime::Offset(capability)
    }
}

/// A timestamp in either supported representation.
///
/// This is the explicit-timestamp argument of dispatch: it is only assigned to
/// fields declared in the same representation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditTime {
    Instant(InstantTime),
    Offset(OffsetTime),
}

impl AuditTime {
    /// Current wall-clock time in the requested representation.
    pub fn now(kind: TimestampKind) -> Self {
        match kind {
            TimestampKind::Instant => Self::Instant(InstantTime::now()),
            TimestampKind::Offset => Self::Offset(OffsetTime::now()),
        }
    }

    pub fn kind(&self) -> TimestampKind {
        match self {
            Self::Instant(_) => TimestampKind::Instant,
            Self::Offset(_) => TimestampKind::Offset,
        }
    }

    pub fn as_instant(&self) -> Option<InstantTime> {
        match self {
            Self::Instant(t) => Some(*t),
            Self::Offset(_) => None,
        }
    }

    pub fn as_offset(&self) -> Option<OffsetTime> {
        match self {
            Self::Offset(t) => Some(*t),
            Self::Instant(_) => None,
        }
    }
}

impl From<InstantTime> for AuditTime {
    fn from(value: InstantTime) -> Self {
        Self::Instant(value)
    }
}

impl From<OffsetTime> for AuditTime {
    fn from(value: OffsetTime) -> Self {
        Self::Offset(value)
    }
}

impl core::fmt::Display for AuditTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Instant(t) => core::fmt::Display::fmt(&t.to_rfc3339(), f),
            Self::Offset(t) => core::fmt::Display::fmt(&t.to_rfc3339(), f),
        }
    }
}
