use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use domain_snapshot::model::vo::MonitoringStatus;
use rdsdbsnap::cli::freshness::{execute, FreshnessCli};
use rdsdbsnap::infrastructure::{
    config::build_config, telemetry::initialize_telemetry, ServiceProvider,
};

fn exit_with(status: MonitoringStatus) -> ExitCode {
    // Plugin codes are 0..=4.
    ExitCode::from(status.code() as u8)
}

fn main() -> ExitCode {
    let cli = match FreshnessCli::try_parse() {
        Ok(x) => x,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return exit_with(MonitoringStatus::Unknown);
        }
    };

    let config = match build_config() {
        Ok(x) => x,
        Err(e) => {
            eprintln!("{}: {e}", "Cannot build config".red());
            return exit_with(MonitoringStatus::Unknown);
        }
    };
    if let Err(e) = initialize_telemetry(&config.telemetry) {
        eprintln!("{}: {e}", "Cannot build logger".red());
        return exit_with(MonitoringStatus::Unknown);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(x) => x,
        Err(e) => {
            eprintln!("{}: {e}", "Cannot build runtime".red());
            return exit_with(MonitoringStatus::Unknown);
        }
    };

    let result = runtime.block_on(async {
        let service_provider = ServiceProvider::build(&config).await;
        execute(
            cli.command,
            service_provider.freshness_check_service().as_ref(),
            &mut std::io::stdout(),
        )
        .await
    });
    match result {
        Ok(status) => exit_with(status),
        Err(e) => {
            eprintln!("{e}");
            exit_with(MonitoringStatus::Unknown)
        }
    }
}
