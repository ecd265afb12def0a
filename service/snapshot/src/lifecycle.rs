use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

use domain_snapshot::{
    exception::{SnapshotException, SnapshotResult},
    model::{
        entity::{snapshot::sort_newest_first, Instance, Snapshot},
        vo::{DeleteOutcome, PurgeReport, RetentionPolicy, SnapshotStatus},
    },
    repository::{InstanceRepo, SnapshotRepo},
    service::{compose_snapshot_id, SnapshotLifecycleService},
};
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

/// Wait before the first status request, a new snapshot isn't visible right away.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(2);
/// The period of poll. Shorter ones run into request rate limits.
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(TypedBuilder)]
pub struct SnapshotLifecycleServiceImpl {
    snapshot_repo: Arc<dyn SnapshotRepo>,
    instance_repo: Arc<dyn InstanceRepo>,
    #[builder(default = DEFAULT_INITIAL_DELAY)]
    initial_delay: Duration,
    #[builder(default = DEFAULT_POLL_PERIOD)]
    poll_period: Duration,
    /// `None` polls until the snapshot settles, however long it takes.
    #[builder(default = Some(DEFAULT_POLL_TIMEOUT))]
    poll_timeout: Option<Duration>,
}

impl SnapshotLifecycleServiceImpl {
    async fn status(&self, snapshot_id: &str) -> SnapshotResult<Option<SnapshotStatus>> {
        Ok(self
            .snapshot_repo
            .get_by_id(snapshot_id)
            .await
            .map_err(SnapshotException::remote("DescribeDBSnapshots"))?
            .map(|el| el.status))
    }

    async fn wait_until_settled(&self, snapshot_id: &str) -> SnapshotResult<SnapshotStatus> {
        let started = Instant::now();
        sleep(self.initial_delay).await;

        loop {
            match self.status(snapshot_id).await? {
                Some(status) if status.is_terminal() => return Ok(status),
                Some(status) => debug!(snapshot_id, %status, "Snapshot is not settled yet."),
                None => debug!(snapshot_id, "Snapshot is not visible yet."),
            }

            let waited = started.elapsed();
            if self.poll_timeout.is_some_and(|timeout| waited >= timeout) {
                return Err(SnapshotException::PollTimeout {
                    snapshot_id: snapshot_id.to_owned(),
                    waited,
                });
            }
            sleep(self.poll_period).await;
        }
    }
}

#[async_trait]
impl SnapshotLifecycleService for SnapshotLifecycleServiceImpl {
    async fn create(
        &self,
        prefix: &str,
        instance_id: &str,
        date_stamp: &str,
    ) -> SnapshotResult<SnapshotStatus> {
        let snapshot_id = compose_snapshot_id(prefix, instance_id, date_stamp);
        self.snapshot_repo
            .create(&snapshot_id, instance_id)
            .await
            .map_err(SnapshotException::remote("CreateDBSnapshot"))?;
        info!(%snapshot_id, instance_id, "Snapshot creation requested.");

        let status = self.wait_until_settled(&snapshot_id).await?;
        info!(%snapshot_id, %status, "Snapshot settled.");
        Ok(status)
    }

    async fn delete(&self, snapshot_id: &str) -> SnapshotResult<DeleteOutcome> {
        match self.status(snapshot_id).await? {
            None => return Ok(DeleteOutcome::DoesNotExist),
            Some(SnapshotStatus::Available) => {}
            Some(status) => return Ok(DeleteOutcome::NotDeletable(status)),
        }

        self.snapshot_repo
            .delete(snapshot_id)
            .await
            .map_err(SnapshotException::remote("DeleteDBSnapshot"))?;

        Ok(match self.status(snapshot_id).await? {
            None => DeleteOutcome::DoesNotExist,
            Some(SnapshotStatus::Deleting) => DeleteOutcome::Deleting,
            Some(status) => DeleteOutcome::Status(status),
        })
    }

    async fn list_instances(&self) -> SnapshotResult<Vec<Instance>> {
        self.instance_repo
            .get_all()
            .await
            .map_err(SnapshotException::remote("DescribeDBInstances"))
    }

    async fn list_snapshots(&self, instance_id: &str) -> SnapshotResult<Vec<Snapshot>> {
        self.snapshot_repo
            .get_all_by_instance(instance_id)
            .await
            .map_err(SnapshotException::remote("DescribeDBSnapshots"))
    }

    async fn purge_older_than(
        &self,
        instance_id: &str,
        days: u32,
    ) -> SnapshotResult<PurgeReport> {
        let policy = RetentionPolicy::manual_older_than_days(days);
        let boundary = policy.boundary(Utc::now())?;
        let mut snapshots = self.list_snapshots(instance_id).await?;
        sort_newest_first(&mut snapshots);

        let mut report = PurgeReport::default();
        for snapshot in snapshots.iter().filter(|el| policy.is_expired(el, boundary)) {
            match self.delete(&snapshot.id).await {
                Ok(outcome) if outcome.is_deleted() => {
                    info!("Deleted snapshot {} of {instance_id}.", snapshot.id);
                    report.deleted.push(snapshot.id.clone());
                }
                Ok(outcome) => {
                    warn!("Snapshot {} was not deleted: {outcome}.", snapshot.id);
                    report.failed.push((snapshot.id.clone(), outcome.to_string()));
                }
                Err(e) => {
                    warn!("Snapshot {} was not deleted: {e}.", snapshot.id);
                    report.failed.push((snapshot.id.clone(), e.to_string()));
                }
            }
        }
        Ok(report)
    }
}
