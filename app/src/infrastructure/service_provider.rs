use std::sync::Arc;

use domain_snapshot::service::{FreshnessCheckService, SnapshotLifecycleService};
use service_snapshot::{FreshnessCheckServiceImpl, SnapshotLifecycleServiceImpl};

use super::{config::SnapConfig, database::RdsRepository};

/// Builds the remote API client once and hands it to every service.
pub struct ServiceProvider {
    lifecycle_service: Arc<dyn SnapshotLifecycleService>,
    freshness_check_service: Arc<dyn FreshnessCheckService>,
}

impl ServiceProvider {
    pub async fn build(config: &SnapConfig) -> Self {
        let rds_repository = Arc::new(RdsRepository::connect(&config.aws).await);

        let lifecycle_service: Arc<dyn SnapshotLifecycleService> = Arc::new(
            SnapshotLifecycleServiceImpl::builder()
                .snapshot_repo(rds_repository.clone())
                .instance_repo(rds_repository.clone())
                .initial_delay(config.poll.initial_delay())
                .poll_period(config.poll.period())
                .poll_timeout(config.poll.timeout())
                .build(),
        );
        let freshness_check_service: Arc<dyn FreshnessCheckService> = Arc::new(
            FreshnessCheckServiceImpl::builder()
                .snapshot_repo(rds_repository)
                .build(),
        );

        Self {
            lifecycle_service,
            freshness_check_service,
        }
    }

    pub fn lifecycle_service(&self) -> Arc<dyn SnapshotLifecycleService> {
        self.lifecycle_service.clone()
    }

    pub fn freshness_check_service(&self) -> Arc<dyn FreshnessCheckService> {
        self.freshness_check_service.clone()
    }
}
