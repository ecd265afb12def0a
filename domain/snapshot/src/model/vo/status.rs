/// Snapshot status reported by the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotStatus {
    /// Being taken.
    Creating,
    /// Ready, can be deleted or restored.
    Available,
    /// Creation failed.
    Failed,
    /// Delete requested, going away.
    Deleting,
    /// Any other raw status, e.g. `copying`.
    Unknown(String),
}

impl SnapshotStatus {
    /// No further server side transition happens without a client action.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Available | Self::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Creating => "creating",
            Self::Available => "available",
            Self::Failed => "failed",
            Self::Deleting => "deleting",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for SnapshotStatus {
    fn from(value: &str) -> Self {
        match value {
            "creating" => Self::Creating,
            "available" => Self::Available,
            "failed" => Self::Failed,
            "deleting" => Self::Deleting,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for SnapshotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who took the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotType {
    /// Taken by the provider's backup schedule.
    Automated,
    /// Taken on request, by us or anyone else.
    Manual,
    /// `shared`, `public`, `awsbackup` and whatever comes next.
    Other(String),
}

impl SnapshotType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Automated => "automated",
            Self::Manual => "manual",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for SnapshotType {
    fn from(value: &str) -> Self {
        match value {
            "automated" => Self::Automated,
            "manual" => Self::Manual,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for SnapshotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
