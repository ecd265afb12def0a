mod freshness;
mod lifecycle;

#[rustfmt::skip]
pub use {
    freshness::FreshnessCheckService,
    lifecycle::{compose_snapshot_id, SnapshotLifecycleService},
};
