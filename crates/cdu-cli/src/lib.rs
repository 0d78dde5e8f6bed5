//! CLI logic for the CDU converter.
//!
//! This module contains the core CLI logic: it loads the configuration,
//! runs the selected conversion and writes the result to a file or stdout.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{
    fs,
    io::{self, Write},
};

use log::{error, info, warn};
use miette::GraphicalReportHandler;

use cdu::{CduError, Converter, Diagnosed, Imported, Severity};

use error_adapter::diagnostic_reportables;

/// Run the CDU CLI application
///
/// Non-fatal diagnostics are rendered to the log; the conversion still
/// succeeds and its output is written.
///
/// # Errors
///
/// Returns `CduError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Input without any diagram section
/// - Malformed JSON block lists
pub fn run(args: &Args) -> Result<(), CduError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let converter = Converter::new(app_config);

    match &args.command {
        Command::Import {
            input,
            output,
            pretty,
            all,
        } => import(&converter, input, output.as_deref(), *pretty, *all),
        Command::Export { input, output } => export(&converter, input, output.as_deref()),
    }
}

fn import(
    converter: &Converter,
    input: &str,
    output: Option<&str>,
    pretty: bool,
    all: bool,
) -> Result<(), CduError> {
    info!(input_path = input, output_path:? = output, all; "Importing diagram");

    let bytes = fs::read(input)?;
    let source = cdu_parser::decode_source(&bytes);

    let json = if all {
        let imported = converter.import_all(&source)?;
        report(&imported, &source);

        let graphs: Vec<_> = imported.value().iter().map(Imported::graph).collect();
        if pretty {
            serde_json::to_string_pretty(&graphs)?
        } else {
            serde_json::to_string(&graphs)?
        }
    } else {
        let imported = converter.import(&source)?;
        report(&imported, &source);

        imported.value().graph_json(pretty)?
    };

    write_output(output, &json)?;

    info!(output_path:? = output; "Graph exported successfully");

    Ok(())
}

fn export(converter: &Converter, input: &str, output: Option<&str>) -> Result<(), CduError> {
    info!(input_path = input, output_path:? = output; "Exporting blocks");

    let json = fs::read_to_string(input)?;
    let text = converter.export_json(&json)?;
    report(&text, &json);

    write_output(output, text.value())?;

    info!(output_path:? = output; "CDU text exported successfully");

    Ok(())
}

/// Writes `content` to `path`, or to stdout when no path is given.
fn write_output(path: Option<&str>, content: &str) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, content),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{content}")?;
            stdout.flush()
        }
    }
}

/// Renders each diagnostic against `src` and logs it at its severity.
fn report<T>(diagnosed: &Diagnosed<T>, src: &str) {
    let diagnostics = diagnosed.diagnostics();
    if diagnostics.is_empty() {
        return;
    }

    let reporter = GraphicalReportHandler::new();
    for (diag, reportable) in diagnostics.iter().zip(diagnostic_reportables(diagnostics, src)) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_err() {
            writer = diag.to_string();
        }

        match diag.severity() {
            Severity::Error => error!("{writer}"),
            Severity::Warning => warn!("{writer}"),
        }
    }

    let errors = diagnosed.count(Severity::Error);
    let warnings = diagnosed.count(Severity::Warning);
    if diagnosed.has_errors() {
        warn!(errors, warnings; "Skipped malformed lines; output is partial");
    } else {
        info!(warnings; "Conversion finished with warnings");
    }
}
