use serde::Deserialize;
use tracing::metadata::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Logging configuration.
#[derive(Deserialize, Clone, Debug)]
pub struct TelemetryConfig {
    #[serde(default = "default_enabled")]
    pub enable: bool,
    /// Global level, used when no filter rules are given.
    #[serde(default)]
    pub max_level: LoggingLevel,
    /// Filter rules, `EnvFilter` syntax. Keeps the SDK's own chatter at warn by default.
    #[serde(default = "default_level_filter")]
    pub level_filter: String,
    /// Environment variable holding filter rules, takes precedence over `level_filter`.
    #[serde(default = "default_level_filter_env")]
    pub level_filter_env: String,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub file: FileConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enable: default_enabled(),
            max_level: Default::default(),
            level_filter: default_level_filter(),
            level_filter_env: default_level_filter_env(),
            console: Default::default(),
            file: Default::default(),
        }
    }
}

#[derive(Default, Deserialize, Clone, Debug)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    Off,
}

impl From<LoggingLevel> for LevelFilter {
    fn from(val: LoggingLevel) -> Self {
        match val {
            LoggingLevel::Error => LevelFilter::ERROR,
            LoggingLevel::Warn => LevelFilter::WARN,
            LoggingLevel::Info => LevelFilter::INFO,
            LoggingLevel::Debug => LevelFilter::DEBUG,
            LoggingLevel::Trace => LevelFilter::TRACE,
            LoggingLevel::Off => LevelFilter::OFF,
        }
    }
}

impl From<LoggingLevel> for Directive {
    fn from(val: LoggingLevel) -> Self {
        let level: LevelFilter = val.into();
        level.into()
    }
}

/// Console output. Always stderr, stdout belongs to the command output.
#[derive(Deserialize, Clone, Debug)]
pub struct ConsoleConfig {
    #[serde(default = "default_enabled")]
    pub enable: bool,
    /// Print file, line number, thread id and target.
    #[serde(default)]
    pub enable_debug_logging: bool,
    #[serde(default)]
    pub max_level: LoggingLevel,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enable: default_enabled(),
            enable_debug_logging: Default::default(),
            max_level: Default::default(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct FileConfig {
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub enable_debug_logging: bool,
    #[serde(default)]
    pub max_level: LoggingLevel,
    /// Log directory, `./logs` by default.
    #[serde(default = "default_path")]
    pub path: String,
    /// Log file name, or prefix when rolling.
    #[serde(default = "default_filename")]
    pub prefix: String,
    #[serde(default)]
    pub rolling_time: RotationLevel,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enable: Default::default(),
            enable_debug_logging: Default::default(),
            max_level: Default::default(),
            path: default_path(),
            prefix: default_filename(),
            rolling_time: Default::default(),
        }
    }
}

#[derive(Default, Deserialize, Clone, Debug)]
#[serde(rename_all = "lowercase")]
pub enum RotationLevel {
    Daily,
    Hourly,
    Minutely,
    #[default]
    Never,
}

impl From<RotationLevel> for Rotation {
    fn from(val: RotationLevel) -> Self {
        match val {
            RotationLevel::Daily => Rotation::DAILY,
            RotationLevel::Hourly => Rotation::HOURLY,
            RotationLevel::Minutely => Rotation::MINUTELY,
            RotationLevel::Never => Rotation::NEVER,
        }
    }
}

fn default_enabled() -> bool {
    true
}
fn default_level_filter() -> String {
    "aws_smithy_runtime=warn,aws_config=warn".to_string()
}
fn default_level_filter_env() -> String {
    "RDSDBSNAP_LOG".to_string()
}
fn default_path() -> String {
    "./logs".to_string()
}
fn default_filename() -> String {
    "rdsdbsnap.log".to_string()
}

/// Rules from `level_filter_env` when it is set, `level_filter` otherwise.
fn build_filter(config: &TelemetryConfig, max_level: &LoggingLevel) -> EnvFilter {
    let mut filter_builder = EnvFilter::builder();
    if !config.level_filter_env.is_empty() {
        filter_builder = filter_builder.with_env_var(config.level_filter_env.as_str());
    }
    let filter_builder = filter_builder.with_default_directive(max_level.clone().into());
    filter_builder
        .try_from_env()
        .unwrap_or_else(|_| filter_builder.parse_lossy(&config.level_filter))
}

pub fn initialize_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    if !config.enable {
        return Ok(());
    }
    let filter = build_filter(config, &config.max_level);
    let console = {
        let layer_config = &config.console;
        if layer_config.enable {
            let enable_debug_logging = layer_config.enable_debug_logging;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_file(enable_debug_logging)
                    .with_line_number(enable_debug_logging)
                    .with_thread_ids(enable_debug_logging)
                    .with_target(enable_debug_logging)
                    .with_filter(build_filter(config, &layer_config.max_level)),
            )
        } else {
            None
        }
    };
    let file = {
        let layer_config = &config.file;
        if layer_config.enable {
            let enable_debug_logging = layer_config.enable_debug_logging;
            let file_appender = RollingFileAppender::new(
                layer_config.rolling_time.clone().into(),
                &layer_config.path,
                &layer_config.prefix,
            );
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(file_appender)
                    .with_file(enable_debug_logging)
                    .with_line_number(enable_debug_logging)
                    .with_thread_ids(enable_debug_logging)
                    .with_target(enable_debug_logging)
                    .with_filter(build_filter(config, &layer_config.max_level)),
            )
        } else {
            None
        }
    };
    Registry::default().with(filter).with(console).with(file).try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn config_with_env(level_filter_env: &str) -> TelemetryConfig {
        TelemetryConfig {
            level_filter_env: level_filter_env.to_string(),
            ..Default::default()
        }
    }

    fn enabled_with(filter: EnvFilter, target_level: impl FnOnce() -> bool) -> bool {
        let subscriber = Registry::default().with(filter);
        tracing::subscriber::with_default(subscriber, target_level)
    }

    #[test]
    fn test_env_var_raises_layer_level() {
        std::env::set_var("RDSDBSNAP_TEST_LOG_RAISE", "debug");
        let config = config_with_env("RDSDBSNAP_TEST_LOG_RAISE");

        let filter = build_filter(&config, &config.console.max_level);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        let filter = build_filter(&config, &config.console.max_level);
        assert!(enabled_with(filter, || tracing::enabled!(Level::DEBUG)));
    }

    #[test]
    fn test_layer_level_without_env_var() {
        let config = config_with_env("RDSDBSNAP_TEST_LOG_UNSET");

        let filter = build_filter(&config, &LoggingLevel::Warn);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
        let filter = build_filter(&config, &config.console.max_level);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_sdk_targets_quiet_by_default() {
        let config = config_with_env("RDSDBSNAP_TEST_LOG_SDK");

        let filter = build_filter(&config, &config.max_level);
        assert!(!enabled_with(filter, || {
            tracing::enabled!(target: "aws_smithy_runtime::client::identity", Level::INFO)
        }));
        let filter = build_filter(&config, &config.max_level);
        assert!(enabled_with(filter, || {
            tracing::enabled!(target: "service_snapshot::lifecycle", Level::INFO)
        }));
    }
}
