use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use rdsdbsnap::cli::{
    lifecycle::{execute, is_usage_error, LifecycleCli},
    FAILURE,
};
use rdsdbsnap::infrastructure::{
    config::build_config, telemetry::initialize_telemetry, ServiceProvider,
};

fn main() -> ExitCode {
    let cli = match LifecycleCli::try_parse() {
        Ok(x) => x,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(FAILURE);
        }
    };

    let config = match build_config() {
        Ok(x) => x,
        Err(e) => {
            eprintln!("{}: {e}", "Cannot build config".red());
            return ExitCode::from(FAILURE);
        }
    };
    if let Err(e) = initialize_telemetry(&config.telemetry) {
        eprintln!("{}: {e}", "Cannot build logger".red());
        return ExitCode::from(FAILURE);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(x) => x,
        Err(e) => {
            eprintln!("{}: {e}", "Cannot build runtime".red());
            return ExitCode::from(FAILURE);
        }
    };

    let result = runtime.block_on(async {
        let service_provider = ServiceProvider::build(&config).await;
        execute(
            cli.command,
            service_provider.lifecycle_service().as_ref(),
            &mut std::io::stdout(),
        )
        .await
    });
    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) if is_usage_error(&e) => {
            eprintln!("{e}");
            ExitCode::from(FAILURE)
        }
        Err(e) => {
            eprintln!("{}: {e:#}", "Error".red());
            ExitCode::from(FAILURE)
        }
    }
}
