//! Command-line argument definitions for the CDU CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects the conversion direction; the global
//! options select the configuration file and logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the CDU converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Conversion direction
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert CDU text into a graph document (JSON)
    Import {
        /// Path to the input CDU file
        input: String,

        /// Path to the output JSON file; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the JSON document
        #[arg(long)]
        pretty: bool,

        /// Convert every diagram in the file into a JSON array
        #[arg(long)]
        all: bool,
    },

    /// Convert a JSON block list into CDU text
    Export {
        /// Path to the input JSON file
        input: String,

        /// Path to the output text file; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
}
