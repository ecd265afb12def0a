use async_trait::async_trait;

use crate::model::entity::Instance;

#[async_trait]
pub trait InstanceRepo: Send + Sync {
    async fn get_all(&self) -> anyhow::Result<Vec<Instance>>;
}
