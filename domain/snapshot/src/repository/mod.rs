mod instance;
mod snapshot;

#[rustfmt::skip]
pub use {
    instance::InstanceRepo,
    snapshot::SnapshotRepo,
};
