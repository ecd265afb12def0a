use chrono::{DateTime, Utc};

use crate::model::vo::{MonitoringStatus, SnapshotStatus};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// What became of a snapshot after a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Not found, either before or right after the delete request.
    DoesNotExist,
    /// Delete accepted and in progress.
    Deleting,
    /// Snapshot isn't `available`, no delete was requested.
    NotDeletable(SnapshotStatus),
    /// Delete requested but the snapshot reports something unexpected.
    Status(SnapshotStatus),
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::DoesNotExist | Self::Deleting)
    }
}

impl std::fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DoesNotExist => write!(f, "does not exist"),
            Self::Deleting => write!(f, "deleting"),
            Self::NotDeletable(status) => write!(f, "not deletable while {status}"),
            Self::Status(status) => write!(f, "{status}"),
        }
    }
}

/// Result of a bulk retention cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// Ids of deleted snapshots, newest first.
    pub deleted: Vec<String>,
    /// Ids that could not be deleted, with the reason.
    pub failed: Vec<(String, String)>,
}

impl PurgeReport {
    pub fn count(&self) -> usize {
        self.deleted.len()
    }
}

/// Outcome of a freshness check, ready to hand to a monitoring system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshnessReport {
    pub status: MonitoringStatus,
    /// Creation time of the newest snapshot.
    pub newest: Option<DateTime<Utc>>,
    /// The newest snapshot is expected to be younger than this.
    pub boundary: Option<DateTime<Utc>>,
    pub message: String,
}

impl FreshnessReport {
    pub fn new(status: MonitoringStatus, newest: DateTime<Utc>, boundary: DateTime<Utc>) -> Self {
        let message = format!(
            "{} - Snapshot time is {}, expected to be younger than {}",
            status.label(),
            newest.format(TIME_FORMAT),
            boundary.format(TIME_FORMAT)
        );
        Self {
            status,
            newest: Some(newest),
            boundary: Some(boundary),
            message,
        }
    }

    pub fn unknown(reason: impl std::fmt::Display) -> Self {
        Self {
            status: MonitoringStatus::Unknown,
            newest: None,
            boundary: None,
            message: format!("{} - {reason}", MonitoringStatus::Unknown.label()),
        }
    }
}
