use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use domain_snapshot::{
    exception::{SnapshotException, SnapshotResult},
    model::vo::{days_before, FreshnessReport, MonitoringStatus},
    repository::SnapshotRepo,
    service::FreshnessCheckService,
};
use tracing::debug;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct FreshnessCheckServiceImpl {
    snapshot_repo: Arc<dyn SnapshotRepo>,
}

impl FreshnessCheckServiceImpl {
    async fn evaluate(
        &self,
        instance_id: &str,
        max_age_days: u32,
        warning_age_days: Option<u32>,
        now: DateTime<Utc>,
    ) -> SnapshotResult<FreshnessReport> {
        let critical_boundary = days_before(now, max_age_days)?;
        let warning_boundary = match warning_age_days {
            Some(days) if days < max_age_days => Some(days_before(now, days)?),
            _ => None,
        };

        let newest = self
            .snapshot_repo
            .get_all_by_instance(instance_id)
            .await
            .map_err(SnapshotException::remote("DescribeDBSnapshots"))?
            .into_iter()
            .filter_map(|el| el.created_at)
            .max()
            .ok_or_else(|| SnapshotException::NoSnapshots {
                instance_id: instance_id.to_owned(),
            })?;
        debug!(instance_id, %newest, %critical_boundary, "Newest snapshot found.");

        if newest <= critical_boundary {
            return Ok(FreshnessReport::new(
                MonitoringStatus::Critical,
                newest,
                critical_boundary,
            ));
        }
        Ok(match warning_boundary {
            Some(boundary) if newest <= boundary => {
                FreshnessReport::new(MonitoringStatus::Warning, newest, boundary)
            }
            _ => FreshnessReport::new(MonitoringStatus::Ok, newest, critical_boundary),
        })
    }
}

#[async_trait]
impl FreshnessCheckService for FreshnessCheckServiceImpl {
    async fn check(
        &self,
        instance_id: &str,
        max_age_days: u32,
        warning_age_days: Option<u32>,
    ) -> FreshnessReport {
        self.evaluate(instance_id, max_age_days, warning_age_days, Utc::now())
            .await
            .unwrap_or_else(FreshnessReport::unknown)
    }
}
