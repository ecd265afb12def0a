use anyhow::anyhow;
use aws_config::BehaviorVersion;
use aws_sdk_rds::config::Region;
use aws_sdk_rds::error::DisplayErrorContext;
use typed_builder::TypedBuilder;

use crate::infrastructure::config::AwsConfig;

/// Remote snapshot API on top of the RDS client.
///
/// Implements the snapshot and instance repositories of the domain.
#[derive(TypedBuilder)]
pub struct RdsRepository {
    pub client: aws_sdk_rds::Client,
}

impl RdsRepository {
    /// Build a client from the standard AWS provider chain plus `config` overrides.
    pub async fn connect(config: &AwsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;
        Self::builder().client(aws_sdk_rds::Client::new(&sdk_config)).build()
    }
}

/// SDK errors only print their kind, this keeps the service message too.
pub fn sdk_error<E: std::error::Error>(e: E) -> anyhow::Error {
    anyhow!("{}", DisplayErrorContext(e))
}
