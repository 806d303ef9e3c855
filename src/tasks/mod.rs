//! Task implementations for the audit commands.
//!
//! Each function corresponds to a subcommand in the CLI and delegates to
//! its own module.

mod list;
mod scan;

use std::path::Path;

use anyhow::Result;

/// Run the symbol query in every non-excluded crate directory under
/// `root`.
///
/// # Errors
///
/// Returns an error if manifest discovery fails. Individual symbol-query
/// failures are reported and skipped; see [`scan::run`] for details.
pub fn scan(root: &Path) -> Result<()> {
    scan::run(root)
}

/// Print the crate directories that `scan` would visit, one per line.
///
/// # Errors
///
/// Returns an error if manifest discovery fails. See [`list::run`] for
/// details.
pub fn list(root: &Path) -> Result<()> {
    list::run(root)
}
