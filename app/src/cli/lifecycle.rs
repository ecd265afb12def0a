use std::io::Write;

use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use domain_snapshot::{
    exception::SnapshotException,
    model::entity::snapshot::sort_newest_first,
    model::vo::SnapshotStatus,
    service::SnapshotLifecycleService,
};

use super::{require, FAILURE, SUCCESS};

pub const DEFAULT_SNAPSHOT_PREFIX: &str = "script-automated-snapshot";

/// rdsdbsnap is a DB snapshot management tool for Amazon RDS.
#[derive(Debug, Parser)]
#[command(name = "rdsdbsnap", version, about, long_about = None)]
pub struct LifecycleCli {
    #[command(subcommand)]
    pub command: LifecycleCommand,
}

#[derive(Debug, Subcommand)]
pub enum LifecycleCommand {
    /// Returns the available RDS instances.
    Instances,
    /// Returns the available RDS instance snapshots, newest first.
    #[command(visible_alias = "list-snapshots")]
    Snapshots {
        /// Database instance.
        #[arg(long)]
        db_instance: Option<String>,
    },
    /// Creates a new DB snapshot and waits until it is available.
    Create {
        /// Database instance.
        #[arg(long)]
        db_instance: Option<String>,
        /// Prefix for snapshot name.
        #[arg(long, default_value = DEFAULT_SNAPSHOT_PREFIX)]
        snapshot_prefix: String,
    },
    /// Deletes a user-specified DB snapshot.
    Delete {
        /// Database snapshot.
        #[arg(long)]
        db_snapshot: Option<String>,
    },
    /// Deletes manual snapshots older than the given number of days.
    DeleteSnapshots {
        /// Database instance.
        #[arg(long)]
        db_instance: Option<String>,
        /// Snapshots created more days ago than this are deleted.
        #[arg(long)]
        older_than_days: Option<u32>,
    },
}

const DB_INSTANCE: (&str, &str) = ("a database", "db-instance");
const DB_SNAPSHOT: (&str, &str) = ("a database snapshot", "db-snapshot");
const OLDER_THAN_DAYS: (&str, &str) = ("a retention age", "older-than-days");

/// Run one command, writing its report to `out`. Returns the process exit code.
pub async fn execute(
    command: LifecycleCommand,
    service: &dyn SnapshotLifecycleService,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    match command {
        LifecycleCommand::Instances => {
            let instances = service.list_instances().await?;
            writeln!(out, "Database Instances:")?;
            for instance in instances {
                writeln!(out, "\t- {}", instance.id)?;
            }
            Ok(SUCCESS)
        }

        LifecycleCommand::Snapshots { db_instance } => {
            let db_instance = require(db_instance, DB_INSTANCE)?;
            let mut snapshots = service.list_snapshots(&db_instance).await?;
            sort_newest_first(&mut snapshots);
            writeln!(out, "Database Snapshots:")?;
            for snapshot in snapshots {
                let created_at = snapshot
                    .created_at
                    .map(format_created_at)
                    .unwrap_or_else(|| snapshot.status.to_string());
                writeln!(out, "\t- {}\t- {created_at}", snapshot.id)?;
            }
            Ok(SUCCESS)
        }

        LifecycleCommand::Create {
            db_instance,
            snapshot_prefix,
        } => {
            let db_instance = require(db_instance, DB_INSTANCE)?;
            let date_stamp = Local::now().format("%Y-%m-%d").to_string();
            writeln!(out, "Creating a new snapshot from {db_instance} instance...")?;
            let status = service.create(&snapshot_prefix, &db_instance, &date_stamp).await?;
            writeln!(out, "Snapshot status: {status}")?;
            Ok(match status {
                SnapshotStatus::Available => SUCCESS,
                _ => FAILURE,
            })
        }

        LifecycleCommand::Delete { db_snapshot } => {
            let db_snapshot = require(db_snapshot, DB_SNAPSHOT)?;
            match service.delete(&db_snapshot).await {
                Ok(outcome) if outcome.is_deleted() => {
                    writeln!(out, "Snapshot: {db_snapshot} has been deleted")?;
                    Ok(SUCCESS)
                }
                Ok(outcome) => {
                    writeln!(out, "Snapshot: {db_snapshot} deletion failed ({outcome})")?;
                    Ok(FAILURE)
                }
                Err(e) => {
                    writeln!(out, "Snapshot: {db_snapshot} deletion failed")?;
                    Err(e.into())
                }
            }
        }

        LifecycleCommand::DeleteSnapshots {
            db_instance,
            older_than_days,
        } => {
            let db_instance = require(db_instance, DB_INSTANCE)?;
            let days = require(older_than_days, OLDER_THAN_DAYS)?;
            let report = service.purge_older_than(&db_instance, days).await?;
            writeln!(
                out,
                "Deleted {} snapshot(s) older than {days} day(s) from {db_instance}",
                report.count()
            )?;
            if report.failed.is_empty() {
                return Ok(SUCCESS);
            }
            writeln!(out, "Failed to delete {} snapshot(s):", report.failed.len())?;
            for (id, reason) in &report.failed {
                writeln!(out, "\t- {id}: {reason}")?;
            }
            Ok(FAILURE)
        }
    }
}

/// Microseconds are shown only when the stamp carries them.
fn format_created_at(created_at: DateTime<Utc>) -> String {
    if created_at.timestamp_subsec_nanos() == 0 {
        created_at.format("%Y-%m-%d %H:%M:%S%:z").to_string()
    } else {
        created_at.format("%Y-%m-%d %H:%M:%S%.6f%:z").to_string()
    }
}

/// Whether `e` is a usage problem rather than a failure of the command itself.
pub fn is_usage_error(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<SnapshotException>(),
        Some(SnapshotException::MissingRequiredInput { .. })
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use clap::CommandFactory;
    use domain_snapshot::{
        mock::MockSnapshotLifecycleService,
        model::{
            entity::{Instance, Snapshot},
            vo::{DeleteOutcome, PurgeReport, SnapshotType},
        },
    };
    use pretty_assertions::assert_eq;

    async fn run(
        command: LifecycleCommand,
        service: &MockSnapshotLifecycleService,
    ) -> (anyhow::Result<u8>, String) {
        let mut out = Vec::new();
        let result = execute(command, service, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    fn parse(args: &[&str]) -> LifecycleCommand {
        LifecycleCli::try_parse_from(std::iter::once("rdsdbsnap").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_cli_definition() {
        LifecycleCli::command().debug_assert();
    }

    #[test]
    fn test_parse_commands() {
        assert!(matches!(
            parse(&["list-snapshots", "--db-instance", "db1"]),
            LifecycleCommand::Snapshots { db_instance: Some(id) } if id == "db1"
        ));
        assert!(matches!(
            parse(&["create", "--db-instance", "db1"]),
            LifecycleCommand::Create { snapshot_prefix, .. } if snapshot_prefix == DEFAULT_SNAPSHOT_PREFIX
        ));
        assert!(matches!(
            parse(&["delete-snapshots", "--db-instance", "db1", "--older-than-days", "30"]),
            LifecycleCommand::DeleteSnapshots { older_than_days: Some(30), .. }
        ));
    }

    #[tokio::test]
    async fn test_instances() {
        let mut service = MockSnapshotLifecycleService::new();
        service
            .expect_list_instances()
            .returning(|| Ok(vec![Instance::new("db1"), Instance::new("db2")]));

        let (result, out) = run(LifecycleCommand::Instances, &service).await;
        assert_eq!(result.unwrap(), SUCCESS);
        assert_eq!(out, "Database Instances:\n\t- db1\n\t- db2\n");
    }

    #[tokio::test]
    async fn test_snapshots_newest_first() {
        let old = Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap();
        let mut service = MockSnapshotLifecycleService::new();
        service.expect_list_snapshots().returning(move |instance_id| {
            let snapshot = |id: &str, days: i64| Snapshot {
                id: id.to_string(),
                instance_id: instance_id.to_string(),
                created_at: Some(old + Duration::days(days)),
                status: SnapshotStatus::Available,
                snapshot_type: SnapshotType::Manual,
            };
            Ok(vec![snapshot("older", 0), snapshot("newer", 1)])
        });

        let (result, out) = run(
            LifecycleCommand::Snapshots {
                db_instance: Some("db1".to_string()),
            },
            &service,
        )
        .await;
        assert_eq!(result.unwrap(), SUCCESS);
        assert_eq!(
            out,
            "Database Snapshots:\n\t- newer\t- 2024-01-02 03:00:00+00:00\n\t- older\t- 2024-01-01 03:00:00+00:00\n"
        );
    }

    #[test]
    fn test_created_at_keeps_fractional_seconds() {
        let whole = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_created_at(whole), "2024-01-02 03:04:05+00:00");
        assert_eq!(
            format_created_at(whole + Duration::milliseconds(123)),
            "2024-01-02 03:04:05.123000+00:00"
        );
    }

    #[tokio::test]
    async fn test_missing_db_instance_is_usage_error() {
        let mut service = MockSnapshotLifecycleService::new();
        service.expect_list_snapshots().times(0);

        let (result, out) = run(LifecycleCommand::Snapshots { db_instance: None }, &service).await;
        let e = result.unwrap_err();
        assert!(is_usage_error(&e));
        assert_eq!(e.to_string(), "Please specify a database using --db-instance option");
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn test_create() {
        let mut service = MockSnapshotLifecycleService::new();
        service
            .expect_create()
            .withf(|prefix, instance_id, date_stamp| {
                prefix == "nightly" && instance_id == "db1" && date_stamp.len() == 10
            })
            .times(1)
            .returning(|_, _, _| Ok(SnapshotStatus::Available));

        let (result, out) = run(
            LifecycleCommand::Create {
                db_instance: Some("db1".to_string()),
                snapshot_prefix: "nightly".to_string(),
            },
            &service,
        )
        .await;
        assert_eq!(result.unwrap(), SUCCESS);
        assert_eq!(
            out,
            "Creating a new snapshot from db1 instance...\nSnapshot status: available\n"
        );
    }

    #[tokio::test]
    async fn test_create_failed_snapshot() {
        let mut service = MockSnapshotLifecycleService::new();
        service.expect_create().returning(|_, _, _| Ok(SnapshotStatus::Failed));

        let (result, out) = run(
            LifecycleCommand::Create {
                db_instance: Some("db1".to_string()),
                snapshot_prefix: DEFAULT_SNAPSHOT_PREFIX.to_string(),
            },
            &service,
        )
        .await;
        assert_eq!(result.unwrap(), FAILURE);
        assert!(out.ends_with("Snapshot status: failed\n"));
    }

    #[tokio::test]
    async fn test_delete_missing_snapshot_counts_as_deleted() {
        let mut service = MockSnapshotLifecycleService::new();
        service.expect_delete().returning(|_| Ok(DeleteOutcome::DoesNotExist));

        let (result, out) = run(
            LifecycleCommand::Delete {
                db_snapshot: Some("s1".to_string()),
            },
            &service,
        )
        .await;
        assert_eq!(result.unwrap(), SUCCESS);
        assert_eq!(out, "Snapshot: s1 has been deleted\n");
    }

    #[tokio::test]
    async fn test_delete_not_deletable() {
        let mut service = MockSnapshotLifecycleService::new();
        service
            .expect_delete()
            .returning(|_| Ok(DeleteOutcome::NotDeletable(SnapshotStatus::Creating)));

        let (result, out) = run(
            LifecycleCommand::Delete {
                db_snapshot: Some("s1".to_string()),
            },
            &service,
        )
        .await;
        assert_eq!(result.unwrap(), FAILURE);
        assert_eq!(out, "Snapshot: s1 deletion failed (not deletable while creating)\n");
    }

    #[tokio::test]
    async fn test_delete_remote_failure() {
        let mut service = MockSnapshotLifecycleService::new();
        service.expect_delete().returning(|_| {
            Err(SnapshotException::RemoteApi {
                operation: "DescribeDBSnapshots",
                source: anyhow::anyhow!("Throttling"),
            })
        });

        let (result, out) = run(
            LifecycleCommand::Delete {
                db_snapshot: Some("s1".to_string()),
            },
            &service,
        )
        .await;
        let e = result.unwrap_err();
        assert!(!is_usage_error(&e));
        assert_eq!(out, "Snapshot: s1 deletion failed\n");
    }

    #[tokio::test]
    async fn test_delete_snapshots() {
        let mut service = MockSnapshotLifecycleService::new();
        service
            .expect_purge_older_than()
            .withf(|instance_id, days| instance_id == "db1" && *days == 7)
            .times(1)
            .returning(|_, _| {
                Ok(PurgeReport {
                    deleted: vec!["a".to_string(), "b".to_string()],
                    failed: vec![],
                })
            });

        let (result, out) = run(
            LifecycleCommand::DeleteSnapshots {
                db_instance: Some("db1".to_string()),
                older_than_days: Some(7),
            },
            &service,
        )
        .await;
        assert_eq!(result.unwrap(), SUCCESS);
        assert_eq!(out, "Deleted 2 snapshot(s) older than 7 day(s) from db1\n");
    }

    #[tokio::test]
    async fn test_delete_snapshots_requires_age() {
        let service = MockSnapshotLifecycleService::new();
        let (result, _) = run(
            LifecycleCommand::DeleteSnapshots {
                db_instance: Some("db1".to_string()),
                older_than_days: None,
            },
            &service,
        )
        .await;
        let e = result.unwrap_err();
        assert!(is_usage_error(&e));
        assert_eq!(
            e.to_string(),
            "Please specify a retention age using --older-than-days option"
        );
    }
}
