use aws_sdk_rds::primitives::DateTime as AwsDateTime;
use aws_sdk_rds::types::DbSnapshot;
use chrono::{DateTime, Utc};
use domain_snapshot::{
    model::{
        entity::Snapshot,
        vo::{SnapshotStatus, SnapshotType},
    },
    repository::SnapshotRepo,
};

use crate::infrastructure::database::{sdk_error, RdsRepository};

fn to_utc(time: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(time.secs(), time.subsec_nanos())
}

fn to_snapshot(db_snapshot: &DbSnapshot) -> Snapshot {
    Snapshot {
        id: db_snapshot.db_snapshot_identifier().unwrap_or_default().to_owned(),
        instance_id: db_snapshot.db_instance_identifier().unwrap_or_default().to_owned(),
        created_at: db_snapshot.snapshot_create_time().and_then(to_utc),
        status: db_snapshot.status().unwrap_or_default().into(),
        snapshot_type: db_snapshot.snapshot_type().unwrap_or_default().into(),
    }
}

#[async_trait::async_trait]
impl SnapshotRepo for RdsRepository {
    async fn create(&self, snapshot_id: &str, instance_id: &str) -> anyhow::Result<()> {
        self.client
            .create_db_snapshot()
            .db_snapshot_identifier(snapshot_id)
            .db_instance_identifier(instance_id)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }

    async fn delete(&self, snapshot_id: &str) -> anyhow::Result<()> {
        self.client
            .delete_db_snapshot()
            .db_snapshot_identifier(snapshot_id)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }

    async fn get_by_id(&self, snapshot_id: &str) -> anyhow::Result<Option<Snapshot>> {
        let result = self
            .client
            .describe_db_snapshots()
            .db_snapshot_identifier(snapshot_id)
            .send()
            .await;
        match result {
            Ok(output) => Ok(output.db_snapshots().first().map(to_snapshot)),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|el| el.is_db_snapshot_not_found_fault()) =>
            {
                Ok(None)
            }
            Err(e) => Err(sdk_error(e)),
        }
    }

    async fn get_all_by_instance(&self, instance_id: &str) -> anyhow::Result<Vec<Snapshot>> {
        let mut items = self
            .client
            .describe_db_snapshots()
            .db_instance_identifier(instance_id)
            .into_paginator()
            .items()
            .send();
        let mut snapshots = vec![];
        while let Some(item) = items.next().await {
            snapshots.push(to_snapshot(&item.map_err(sdk_error)?));
        }
        Ok(snapshots)
    }
}
