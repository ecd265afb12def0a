use std::io::Write;

use clap::{Parser, Subcommand};
use domain_snapshot::{model::vo::MonitoringStatus, service::FreshnessCheckService};

use super::require;

/// check_snapshots is a Nagios/Icinga plugin that checks latest snapshot date.
#[derive(Debug, Parser)]
#[command(name = "check_snapshots", version, about, long_about = None)]
pub struct FreshnessCli {
    #[command(subcommand)]
    pub command: FreshnessCommand,
}

#[derive(Debug, Subcommand)]
pub enum FreshnessCommand {
    /// Return date and time of newest snapshot.
    Status {
        /// Database instance.
        #[arg(long)]
        db_instance: Option<String>,
        /// How old in days we expect our snapshot will be.
        #[arg(long)]
        not_older_than_days: Option<u32>,
        /// Warn once the newest snapshot is older than this, must be below the critical age.
        #[arg(long)]
        warning_older_than_days: Option<u32>,
    },
}

/// Run the check, print its message to `out` and return the status to exit with.
pub async fn execute(
    command: FreshnessCommand,
    service: &dyn FreshnessCheckService,
    out: &mut impl Write,
) -> anyhow::Result<MonitoringStatus> {
    match command {
        FreshnessCommand::Status {
            db_instance,
            not_older_than_days,
            warning_older_than_days,
        } => {
            let db_instance = require(db_instance, ("a database", "db-instance"))?;
            let max_age_days =
                require(not_older_than_days, ("the maximum age", "not-older-than-days"))?;
            let report = service.check(&db_instance, max_age_days, warning_older_than_days).await;
            writeln!(out, "{}", report.message)?;
            Ok(report.status)
        }
    }
}
