//! Implementation of the `list` command.
//!
//! Prints the crate directories `scan` would visit, in the same order,
//! without dispatching the symbol query. Meant for scripting.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::manifest;

/// Print the non-excluded crate directories under `root`, one per line.
///
/// # Errors
///
/// Returns an error if manifest discovery fails or stdout cannot be
/// written.
pub fn run(root: &Path) -> Result<()> {
    let stdout = io::stdout();
    write_to(root, &mut stdout.lock())
}

/// Writes the crate directory listing to the given sink.
fn write_to(root: &Path, out: &mut impl Write) -> Result<()> {
    for manifest_path in manifest::find_manifests(root)? {
        writeln!(out, "{}", manifest::crate_dir(&manifest_path).display())
            .context("Failed to write crate directory listing")?;
    }

    Ok(())
}
