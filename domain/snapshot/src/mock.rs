use async_trait::async_trait;
use mockall::mock;

use crate::{
    exception::SnapshotResult,
    model::{
        entity::{Instance, Snapshot},
        vo::{DeleteOutcome, FreshnessReport, PurgeReport, SnapshotStatus},
    },
    repository::{InstanceRepo, SnapshotRepo},
    service::{FreshnessCheckService, SnapshotLifecycleService},
};

mock! {
    pub SnapshotRepo {}
    #[async_trait]
    impl SnapshotRepo for SnapshotRepo {
        async fn create(&self, snapshot_id: &str, instance_id: &str) -> anyhow::Result<()>;
        async fn delete(&self, snapshot_id: &str) -> anyhow::Result<()>;
        async fn get_by_id(&self, snapshot_id: &str) -> anyhow::Result<Option<Snapshot>>;
        async fn get_all_by_instance(&self, instance_id: &str) -> anyhow::Result<Vec<Snapshot>>;
    }
}

mock! {
    pub InstanceRepo {}
    #[async_trait]
    impl InstanceRepo for InstanceRepo {
        async fn get_all(&self) -> anyhow::Result<Vec<Instance>>;
    }
}

mock! {
    pub SnapshotLifecycleService {}
    #[async_trait]
    impl SnapshotLifecycleService for SnapshotLifecycleService {
        async fn create(
            &self,
            prefix: &str,
            instance_id: &str,
            date_stamp: &str,
        ) -> SnapshotResult<SnapshotStatus>;
        async fn delete(&self, snapshot_id: &str) -> SnapshotResult<DeleteOutcome>;
        async fn list_instances(&self) -> SnapshotResult<Vec<Instance>>;
        async fn list_snapshots(&self, instance_id: &str) -> SnapshotResult<Vec<Snapshot>>;
        async fn purge_older_than(&self, instance_id: &str, days: u32) -> SnapshotResult<PurgeReport>;
    }
}

mock! {
    pub FreshnessCheckService {}
    #[async_trait]
    impl FreshnessCheckService for FreshnessCheckService {
        async fn check(
            &self,
            instance_id: &str,
            max_age_days: u32,
            warning_age_days: Option<u32>,
        ) -> FreshnessReport;
    }
}
