mod instance;
pub mod snapshot;

#[rustfmt::skip]
pub use {
    instance::Instance,
    snapshot::Snapshot,
};
