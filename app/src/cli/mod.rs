//! Command line surfaces of `rdsdbsnap` and `check_snapshots`.

pub mod freshness;
pub mod lifecycle;

use domain_snapshot::exception::{SnapshotException, SnapshotResult};

pub const SUCCESS: u8 = 0;
/// Exit code of a failed lifecycle command.
pub const FAILURE: u8 = 1;

/// Unwrap a flag clap left optional, so we can report it our own way.
fn require<T>(value: Option<T>, (subject, flag): (&'static str, &'static str)) -> SnapshotResult<T> {
    value.ok_or(SnapshotException::MissingRequiredInput { subject, flag })
}
