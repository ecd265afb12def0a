use async_trait::async_trait;

use crate::exception::SnapshotResult;
use crate::model::entity::{Instance, Snapshot};
use crate::model::vo::{DeleteOutcome, PurgeReport, SnapshotStatus};

/// Snapshot lifecycle service.
///
/// Creation and deletion are asynchronous on the remote side, so `create`
/// polls until the snapshot settles and `delete` looks the snapshot up again
/// after requesting the delete.
#[async_trait]
pub trait SnapshotLifecycleService: Send + Sync {
    /// Create `{prefix}-{instance_id}-{date_stamp}` and wait until it is
    /// `available` or `failed`.
    async fn create(
        &self,
        prefix: &str,
        instance_id: &str,
        date_stamp: &str,
    ) -> SnapshotResult<SnapshotStatus>;
    /// Delete a snapshot if it is `available`.
    async fn delete(&self, snapshot_id: &str) -> SnapshotResult<DeleteOutcome>;
    /// All instances, unsorted.
    async fn list_instances(&self) -> SnapshotResult<Vec<Instance>>;
    /// All snapshots of an instance, unsorted.
    async fn list_snapshots(&self, instance_id: &str) -> SnapshotResult<Vec<Snapshot>>;
    /// Delete manual snapshots created more than `days` days ago.
    async fn purge_older_than(&self, instance_id: &str, days: u32)
        -> SnapshotResult<PurgeReport>;
}

/// Identifier of a snapshot taken by `create`.
pub fn compose_snapshot_id(prefix: &str, instance_id: &str, date_stamp: &str) -> String {
    format!("{prefix}-{instance_id}-{date_stamp}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_snapshot_id() {
        assert_eq!(
            compose_snapshot_id("nightly", "db1", "2024-01-01"),
            "nightly-db1-2024-01-01"
        );
    }
}
