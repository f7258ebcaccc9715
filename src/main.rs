//! iobench CLI entry point

use anyhow::Result;
use clap::Parser;
use iobench::config::{cli::Cli, Config, ConfigError};
use iobench::coordinator::Coordinator;
use iobench::output::{text, OutputSink};
use std::sync::Arc;

fn main() {
    std::process::exit(run_main());
}

/// Parse, validate, run, and map failures to exit codes
fn run_main() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            use clap::error::ErrorKind;
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => ConfigError::ExtraneousArguments.exit_code(),
            };
        }
    };

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return err.exit_code();
        }
    };

    match run(config) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            os_error_code(&err).unwrap_or(1)
        }
    }
}

/// Execute one benchmark run
fn run(config: Config) -> Result<()> {
    let sink = match &config.output_path {
        Some(path) => OutputSink::append_file(path)?,
        None => OutputSink::console(),
    };
    let sink = Arc::new(sink);
    let config = Arc::new(config);

    sink.write_line(&text::render_configuration(&config))?;

    let coordinator = Coordinator::new(Arc::clone(&config), Arc::clone(&sink));
    let mut aggregator = coordinator.run()?;

    text::render_report(&config, &mut aggregator, &sink)
}

/// Underlying OS errno of a failed run, when one exists in the chain
fn os_error_code(err: &anyhow::Error) -> Option<i32> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<std::io::Error>())
        .and_then(|io_err| io_err.raw_os_error())
}
