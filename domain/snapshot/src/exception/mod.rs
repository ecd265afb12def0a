use std::time::Duration;

pub type SnapshotResult<T> = Result<T, SnapshotException>;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotException {
    #[error("Please specify {subject} using --{flag} option")]
    MissingRequiredInput {
        subject: &'static str,
        flag: &'static str,
    },

    #[error("{operation} failed: {source}")]
    RemoteApi {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("No snapshots found for instance {instance_id}")]
    NoSnapshots { instance_id: String },

    #[error(
        "Snapshot {snapshot_id} did not become available or failed within {} seconds",
        waited.as_secs()
    )]
    PollTimeout {
        snapshot_id: String,
        waited: Duration,
    },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl SnapshotException {
    /// Wrap a remote failure of `operation`.
    pub fn remote(operation: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self::RemoteApi { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_names_the_operation() {
        let e = SnapshotException::remote("DeleteDBSnapshot")(anyhow::anyhow!("Throttling"));
        assert!(matches!(
            e,
            SnapshotException::RemoteApi {
                operation: "DeleteDBSnapshot",
                ..
            }
        ));
        assert_eq!(e.to_string(), "DeleteDBSnapshot failed: Throttling");
    }
}
