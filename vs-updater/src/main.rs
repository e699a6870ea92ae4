use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vs_updater::{list_versions, run, Cli};

fn init_logging(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("Invalid log level: {}", default_level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn try_main(cli: Cli) -> Result<()> {
    init_logging(&cli.log_level)?;

    if cli.list_versions {
        let stdout = std::io::stdout();
        list_versions(&mut stdout.lock())?;
        return Ok(());
    }

    let config = cli.into_configuration();
    run(&config)?;
    Ok(())
}

fn main() -> ExitCode {
    // Usage errors are reported by clap, which exits non-zero on its own
    let cli = Cli::parse();

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{:#}", error);
            ExitCode::FAILURE
        }
    }
}
