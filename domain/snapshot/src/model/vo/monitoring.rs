/// Nagios/Icinga plugin status.
///
/// The exit code of a check is `code()`, the first word of its output is `label()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitoringStatus {
    Ok,
    Warning,
    Critical,
    Unknown,
    /// Part of the plugin convention, never produced by the freshness check.
    Dependent,
}

impl MonitoringStatus {
    pub const fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
            Self::Dependent => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
            Self::Dependent => "DEPENDENT",
        }
    }
}

impl std::fmt::Display for MonitoringStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
