use aws_sdk_rds::types::DbInstance;
use domain_snapshot::{model::entity::Instance, repository::InstanceRepo};

use crate::infrastructure::database::{sdk_error, RdsRepository};

fn to_instance(db_instance: &DbInstance) -> Instance {
    Instance::new(db_instance.db_instance_identifier().unwrap_or_default())
}

#[async_trait::async_trait]
impl InstanceRepo for RdsRepository {
    async fn get_all(&self) -> anyhow::Result<Vec<Instance>> {
        let mut items = self.client.describe_db_instances().into_paginator().items().send();
        let mut instances = vec![];
        while let Some(item) = items.next().await {
            instances.push(to_instance(&item.map_err(sdk_error)?));
        }
        Ok(instances)
    }
}
