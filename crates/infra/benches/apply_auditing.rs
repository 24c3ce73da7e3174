use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use auditkit_core::{
    AuditKind, HasCreationTime, HasCreatorId, HasDeleterId, HasDeletionTime, HasModificationTime,
    HasModifierId, InstantTime, SoftDeletable, audit_capabilities,
};
use auditkit_infra::{AuditChangeTracker, EntityState, Tracked, UnitOfWork};
use chrono::{TimeZone, Utc};

/// Fully audited row, all timestamps as bare instants.
#[derive(Debug, Clone, Default)]
struct Row {
    created_at: Option<InstantTime>,
    created_by: Option<u64>,
    modified_at: Option<InstantTime>,
    modified_by: Option<u64>,
    is_deleted: bool,
    deleted_at: Option<InstantTime>,
    deleted_by: Option<u64>,
}

impl HasCreationTime for Row {
    type Time = InstantTime;

    fn created_at(&self) -> Option<InstantTime> {
        self.created_at
    }

    fn set_created_at(&mut self, at: InstantTime) {
        self.created_at = Some(at);
    }
}

impl HasCreatorId<u64> for Row {
    fn created_by(&self) -> Option<&u64> {
        self.created_by.as_ref()
    }

    fn set_created_by(&mut self, actor: u64) {
        self.created_by = Some(actor);
    }
}

impl HasModificationTime for Row {
    type Time = InstantTime;

    fn modified_at(&self) -> Option<InstantTime> {
        self.modified_at
    }

    fn set_modified_at(&mut self, at: InstantTime) {
        self.modified_at = Some(at);
    }
}

impl HasModifierId<u64> for Row {
    fn modified_by(&self) -> Option<&u64> {
        self.modified_by.as_ref()
    }

    fn set_modified_by(&mut self, actor: u64) {
        self.modified_by = Some(actor);
    }
}

impl SoftDeletable for Row {
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.is_deleted = deleted;
    }
}

impl HasDeletionTime for Row {
    type Time = InstantTime;

    fn deleted_at(&self) -> Option<InstantTime> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, at: InstantTime) {
        self.deleted_at = Some(at);
    }
}

impl HasDeleterId<u64> for Row {
    fn deleted_by(&self) -> Option<&u64> {
        self.deleted_by.as_ref()
    }

    fn set_deleted_by(&mut self, actor: u64) {
        self.deleted_by = Some(actor);
    }
}

audit_capabilities!(Row, u64 => [
    creation_time,
    creator_id,
    modification_time,
    modifier_id,
    soft_deletable,
    deletion_time,
    deleter_id,
]);

impl Tracked<u64> for Row {
    fn as_auditable(&mut self) -> Option<&mut dyn AuditKind<u64>> {
        Some(self)
    }
}

/// Unit of work with an even mix of idle, added, modified and deleted rows.
fn build_unit_of_work(size: usize) -> UnitOfWork<Row> {
    let states = [
        EntityState::Unchanged,
        EntityState::Added,
        EntityState::Modified,
        EntityState::Deleted,
    ];
    let mut uow = UnitOfWork::new();
    for i in 0..size {
        uow.track(Row::default(), states[i % states.len()]);
    }
    uow
}

fn bench_apply_auditing(c: &mut Criterion) {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut group = c.benchmark_group("apply_auditing");

    for size in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("explicit_time", size), &size, |b, &size| {
            b.iter_batched(
                || build_unit_of_work(size),
                |mut uow| black_box(uow.apply_auditing_by_at(7_u64, at)),
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("wall_clock", size), &size, |b, &size| {
            b.iter_batched(
                || build_unit_of_work(size),
                |mut uow| black_box(uow.apply_auditing_by(7_u64)),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply_auditing);
criterion_main!(benches);
