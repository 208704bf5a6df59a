//! CLI logic for the Umlapse history animator.
//!
//! Reads the revision files, writes one `frame_NNN.dot` per animation frame
//! and a `changelog.txt` into the output directory.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{debug, info};

use umlapse::{HistoryBuilder, UmlapseError, timeline::DiagramScope};

/// Name of the changelog written next to the frames.
pub const CHANGELOG_FILE: &str = "changelog.txt";

/// File name of the 1-based `number`-th frame.
pub fn frame_file_name(number: usize) -> String {
    format!("frame_{number:03}.dot")
}

/// Run the Umlapse CLI application
///
/// # Errors
///
/// Returns `UmlapseError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Model document parsing errors
/// - Malformed revisions
pub fn run(args: &Args) -> Result<(), UmlapseError> {
    info!(
        revisions = args.revisions.len(),
        output_dir = args.output_dir;
        "Processing revisions"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = HistoryBuilder::new(app_config);

    let mut revisions = Vec::with_capacity(args.revisions.len());
    for (index, path) in args.revisions.iter().enumerate() {
        debug!(revision = index + 1, path; "Reading revision");
        let source = fs::read_to_string(path)?;
        revisions.push(builder.parse_revision(index + 1, &source)?);
    }

    if args.list_diagrams {
        for (name, id) in builder.diagrams(&revisions) {
            println!("{name}\t{id}");
        }
        return Ok(());
    }

    let scope = args
        .scope
        .as_deref()
        .map(DiagramScope::from_id)
        .unwrap_or_else(|| builder.config().history().scope());

    let timeslices = builder.timeslices(&revisions, &scope)?;
    let frames = builder.render_frames(&timeslices);
    let changelog = builder.changelog(&timeslices, args.from, args.to);

    let output_dir = Path::new(&args.output_dir);
    fs::create_dir_all(output_dir)?;
    for (index, frame) in frames.iter().enumerate() {
        fs::write(output_dir.join(frame_file_name(index + 1)), frame)?;
    }
    fs::write(output_dir.join(CHANGELOG_FILE), changelog)?;

    info!(frames = frames.len(), output_dir = args.output_dir; "Frames exported successfully");

    Ok(())
}
