use chrono::{DateTime, Duration, Utc};

use crate::exception::{SnapshotException, SnapshotResult};
use crate::model::entity::Snapshot;
use crate::model::vo::SnapshotType;

/// `now` minus `days` whole days.
pub fn days_before(now: DateTime<Utc>, days: u32) -> SnapshotResult<DateTime<Utc>> {
    now.checked_sub_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| SnapshotException::InvalidInput {
            reason: format!("{days} days before {now} is out of range"),
        })
}

/// Which snapshots a bulk cleanup may delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Snapshots created this many days ago or earlier are expired.
    pub max_age_days: u32,
    /// Only snapshots of this type are eligible.
    pub snapshot_type: SnapshotType,
}

impl RetentionPolicy {
    /// Manual snapshots only. Automated ones are the provider's business.
    pub fn manual_older_than_days(max_age_days: u32) -> Self {
        Self {
            max_age_days,
            snapshot_type: SnapshotType::Manual,
        }
    }

    pub fn boundary(&self, now: DateTime<Utc>) -> SnapshotResult<DateTime<Utc>> {
        days_before(now, self.max_age_days)
    }

    pub fn is_expired(&self, snapshot: &Snapshot, boundary: DateTime<Utc>) -> bool {
        snapshot.snapshot_type == self.snapshot_type && snapshot.is_older_than(boundary)
    }
}
