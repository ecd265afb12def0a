use serde::Deserialize;
use std::time::Duration;

use super::telemetry::TelemetryConfig;

/// Name of the optional yaml config file looked up in the working directory.
const CONFIG_FILE: &str = "rdsdbsnap";
/// Environment overrides, e.g. `RDSDBSNAP__POLL__TIMEOUT_SECS=0`.
const ENV_PREFIX: &str = "RDSDBSNAP";

#[derive(Default, Clone, Deserialize, Debug)]
pub struct SnapConfig {
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub poll: PollConfig,
}

/// Overrides for the standard AWS provider chain. Unset means "ask the chain".
#[derive(Default, Clone, Deserialize, Debug)]
pub struct AwsConfig {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct PollConfig {
    #[serde(default = "PollConfig::default_initial_delay_secs")]
    pub initial_delay_secs: u64,
    #[serde(default = "PollConfig::default_period_secs")]
    pub period_secs: u64,
    /// 0 waits forever.
    #[serde(default = "PollConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl PollConfig {
    fn default_initial_delay_secs() -> u64 {
        service_snapshot::DEFAULT_INITIAL_DELAY.as_secs()
    }
    fn default_period_secs() -> u64 {
        service_snapshot::DEFAULT_POLL_PERIOD.as_secs()
    }
    fn default_timeout_secs() -> u64 {
        service_snapshot::DEFAULT_POLL_TIMEOUT.as_secs()
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_delay_secs: Self::default_initial_delay_secs(),
            period_secs: Self::default_period_secs(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

pub fn build_config() -> anyhow::Result<SnapConfig> {
    let config = config::Config::builder()
        .add_source(
            config::File::with_name(CONFIG_FILE)
                .required(false)
                .format(config::FileFormat::Yaml),
        )
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::telemetry::LoggingLevel;

    fn from_yaml(yaml: &str) -> SnapConfig {
        config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_yaml("{}");
        assert_eq!(config.poll.initial_delay(), Duration::from_secs(2));
        assert_eq!(config.poll.period(), Duration::from_secs(10));
        assert_eq!(config.poll.timeout(), Some(Duration::from_secs(7200)));
        assert!(config.aws.region.is_none());
        assert!(config.telemetry.enable);
    }

    #[test]
    fn test_overrides() {
        let config = from_yaml(
            "
aws:
  region: eu-west-1
  profile: backups
poll:
  timeout_secs: 0
telemetry:
  console:
    max_level: debug
",
        );
        assert_eq!(config.aws.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.aws.profile.as_deref(), Some("backups"));
        assert_eq!(config.poll.timeout(), None);
        assert!(matches!(config.telemetry.console.max_level, LoggingLevel::Debug));
    }
}
