use async_trait::async_trait;

use crate::model::entity::Snapshot;

/// Remote snapshot API.
///
/// Create and delete are only acknowledged, the status changes later on the
/// remote side.
#[async_trait]
pub trait SnapshotRepo: Send + Sync {
    async fn create(&self, snapshot_id: &str, instance_id: &str) -> anyhow::Result<()>;
    async fn delete(&self, snapshot_id: &str) -> anyhow::Result<()>;
    /// `None` when no such snapshot exists.
    async fn get_by_id(&self, snapshot_id: &str) -> anyhow::Result<Option<Snapshot>>;
    async fn get_all_by_instance(&self, instance_id: &str) -> anyhow::Result<Vec<Snapshot>>;
}
