//! Command-line argument definitions for the Umlapse CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the revision files, the output
//! directory, the diagram scope and changelog range, configuration file
//! selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Umlapse history animator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Revision files, oldest first
    #[arg(required = true, help = "Paths to the revision model documents (.mdj), oldest first")]
    pub revisions: Vec<String>,

    /// Directory receiving the frames and the changelog
    #[arg(short, long, default_value = "frames")]
    pub output_dir: String,

    /// Diagram identifier to animate, or `all`
    #[arg(short, long)]
    pub scope: Option<String>,

    /// First revision (1-based) of the changelog
    #[arg(long)]
    pub from: Option<usize>,

    /// Last revision (1-based) of the changelog
    #[arg(long)]
    pub to: Option<usize>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the diagrams found in the revisions and exit
    #[arg(long)]
    pub list_diagrams: bool,
}
