mod freshness;
mod lifecycle;

#[rustfmt::skip]
pub use {
    freshness::FreshnessCheckServiceImpl,
    lifecycle::{
        SnapshotLifecycleServiceImpl, DEFAULT_INITIAL_DELAY, DEFAULT_POLL_PERIOD,
        DEFAULT_POLL_TIMEOUT,
    },
};
