//! `cdu` binary.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use cdu::CduError;
use cdu_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);

    info!(command:? = args.command; "cdu starting");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = cdu_cli::run(&args) {
        report_failure(&err);
        process::exit(1);
    }

    info!("Conversion completed");
}

/// Logs go to stderr; stdout is reserved for converted output.
fn init_logger(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level `{level}`, falling back to `warn`");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .target(env_logger::Target::Stderr)
        .init();
}

fn report_failure(err: &CduError) {
    let handler = GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        if handler.render_report(&mut rendered, &reportable).is_err() {
            rendered = reportable.to_string();
        }
        error!("{rendered}");
    }
}
