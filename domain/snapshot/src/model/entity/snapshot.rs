use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::model::vo::{SnapshotStatus, SnapshotType};

/// DB snapshot as observed through the remote API.
///
/// The remote side owns the whole lifecycle, we only request transitions
/// (create, delete) and watch `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Snapshot identifier, unique per account and region.
    pub id: String,
    /// Identifier of the instance the snapshot was taken from.
    pub instance_id: String,
    /// Creation time. `None` until the remote API stamps a snapshot being created.
    pub created_at: Option<DateTime<Utc>>,
    pub status: SnapshotStatus,
    pub snapshot_type: SnapshotType,
}

impl Snapshot {
    /// Whether the snapshot was created strictly before `boundary`.
    ///
    /// A snapshot without creation time is never older than anything.
    pub fn is_older_than(&self, boundary: DateTime<Utc>) -> bool {
        self.created_at.is_some_and(|created_at| created_at < boundary)
    }
}

/// Sort snapshots by creation time, newest first.
///
/// Unstamped snapshots are still in flight, so they go in front.
pub fn sort_newest_first(snapshots: &mut [Snapshot]) {
    snapshots.sort_by(|a, b| match (a.created_at, b.created_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
