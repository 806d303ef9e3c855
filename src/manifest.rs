//! Build-manifest discovery for the workspace tree.
//!
//! This module provides the discovery half of the audit: walking the
//! tree for `Cargo.toml` files, dropping the excluded boot component,
//! and returning the survivors in a deterministic order. Dispatch lives
//! in the task modules.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// File name identifying one buildable unit in the workspace.
pub const MANIFEST_FILE: &str = "Cargo.toml";

/// Path substring marking the boot component that is never audited.
///
/// The boot crate carries no panic machinery, so querying it only
/// produces noise.
pub const EXCLUDED_COMPONENT: &str = "raspi3_boot";

/// Returns `true` if the manifest path belongs to the excluded boot
/// component.
///
/// The check is a plain substring match on the whole path, so the
/// component is skipped no matter where it sits in the tree.
#[must_use]
pub fn is_excluded(path: &Path) -> bool {
    path.to_string_lossy().contains(EXCLUDED_COMPONENT)
}

/// Returns the directory containing a manifest.
///
/// A manifest sitting directly at the scan root maps to `.` rather than
/// an empty path.
#[must_use]
pub fn crate_dir(manifest_path: &Path) -> &Path {
    match manifest_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Finds all non-excluded build manifests under `root`.
///
/// Paths are returned relative to `root` and sorted by their rendered
/// path string in ascending lexicographic order, so repeated runs over
/// an unchanged tree visit crates in the same order on every platform.
///
/// # Errors
///
/// Returns an error if the directory walk fails (for example on a
/// permission-denied subtree). Enumeration failures are hard errors;
/// they terminate the run rather than being skipped.
pub fn find_manifests(root: &Path) -> Result<Vec<PathBuf>> {
    let mut manifests = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| {
            format!("Failed to walk workspace tree under '{}'", root.display())
        })?;

        if !entry.file_type().is_file() || entry.file_name() != MANIFEST_FILE {
            continue;
        }

        let relative = entry.path().strip_prefix(root).with_context(|| {
            format!(
                "Manifest '{}' is not under scan root '{}'",
                entry.path().display(),
                root.display()
            )
        })?;

        if is_excluded(relative) {
            continue;
        }

        manifests.push(relative.to_path_buf());
    }

    // Sort on the rendered string, not component-wise: `Path` ordering
    // diverges from string order when a separator meets a sibling name
    // (`-` sorts before `/` as bytes).
    manifests.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    Ok(manifests)
}
