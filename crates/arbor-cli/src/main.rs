//! Arbor CLI entry point.

use std::{fs, process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use arbor_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Arbor");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = arbor_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();
        let source = fs::read_to_string(&args.input).ok();

        // One report per diagnostic, labelled against the item list
        for reportable in to_reportables(&err, source.as_deref()) {
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, &reportable)
                .expect("Writing to String buffer is infallible");

            error!("{writer}");
        }

        process::exit(1);
    }

    info!("Completed successfully");
}
