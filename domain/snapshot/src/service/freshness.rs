use async_trait::async_trait;

use crate::model::vo::FreshnessReport;

/// Answers "is the newest snapshot of this instance recent enough?".
#[async_trait]
pub trait FreshnessCheckService: Send + Sync {
    /// Never fails: anything that prevents a verdict becomes an UNKNOWN report.
    ///
    /// `warning_age_days` only has an effect when it is smaller than `max_age_days`.
    async fn check(
        &self,
        instance_id: &str,
        max_age_days: u32,
        warning_age_days: Option<u32>,
    ) -> FreshnessReport;
}
