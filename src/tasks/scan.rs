//! Implementation of the `scan` command.
//!
//! Walks the workspace tree for build manifests and runs the symbol
//! query once per crate directory, printing a header before each
//! invocation. The query output passes through to the inherited streams
//! unmodified; nothing is captured or parsed.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use xshell::{Shell, cmd};

use crate::manifest;

/// Shell pipeline listing compiled symbol names and filtering for the
/// panic-formatting symbol.
///
/// `grep` exits non-zero when the symbol is absent, which is an expected
/// outcome, so the query's exit status must never be treated as an
/// error.
const SYMBOL_QUERY: &str = "cargo nm | grep panic_fmt";

/// Run the symbol query in every non-excluded crate directory under
/// `root`.
///
/// # Errors
///
/// Returns an error if the shell cannot be created, manifest discovery
/// fails, or stdout cannot be written.
pub fn run(root: &Path) -> Result<()> {
    let stdout = io::stdout();
    run_with_output(root, &mut stdout.lock())
}

/// Runs the scan, emitting headers to the given sink.
///
/// Crates are visited in ascending lexicographic order of their manifest
/// paths. For each crate a blank line and a `<dir>:` header are written,
/// then the query runs with the crate directory as working context.
///
/// Query failures (missing tool, non-zero exit, symbol absent) do not
/// halt the loop; the audit is a best-effort developer diagnostic, not a
/// CI gate.
fn run_with_output(root: &Path, out: &mut impl Write) -> Result<()> {
    let sh = Shell::new().context("Failed to create shell")?;
    let manifests = manifest::find_manifests(root)?;

    for manifest_path in manifests {
        let crate_dir = manifest::crate_dir(&manifest_path);
        writeln!(out).context("Failed to write header")?;
        writeln!(out, "{}", header(crate_dir)).context("Failed to write header")?;
        // The header must reach the stream before the query's inherited
        // output.
        out.flush().context("Failed to flush header")?;

        // The guard restores the previous directory when it drops, on
        // success and on query failure alike.
        let _guard = sh.push_dir(root.join(crate_dir));
        if let Err(err) = cmd!(sh, "sh -c {SYMBOL_QUERY}").quiet().ignore_status().run() {
            eprintln!(
                "  Symbol query failed in '{}': {err}",
                crate_dir.display()
            );
        }
    }

    Ok(())
}

/// Formats the per-crate header line.
fn header(dir: &Path) -> String {
    format!("{}:", dir.display())
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;

    fn touch_manifest(root: &Path, dir: &str) {
        let dir_path = root.join(dir);
        fs::create_dir_all(&dir_path).expect("Failed to create crate dir");
        fs::write(
            dir_path.join(manifest::MANIFEST_FILE),
            "[package]\nname = \"stub\"\nversion = \"0.1.0\"\n",
        )
        .expect("Failed to write manifest");
    }

    #[test]
    fn test_header_appends_colon() {
        assert_eq!(header(Path::new("a")), "a:");
        assert_eq!(header(Path::new("lessons/05_uart0")), "lessons/05_uart0:");
        assert_eq!(header(Path::new(".")), ".:");
    }

    #[test]
    #[serial]
    fn test_scan_emits_headers_in_order_with_blank_line_framing() {
        // Stub crates have no compiled artifacts, so the query itself
        // contributes nothing to the header sink.
        let tmp = TempDir::new().expect("Failed to create temp dir");
        touch_manifest(tmp.path(), "c");
        touch_manifest(tmp.path(), "b/raspi3_boot");
        touch_manifest(tmp.path(), "a");

        let mut out = Vec::new();
        run_with_output(tmp.path(), &mut out).expect("Scan failed");

        let headers = String::from_utf8(out).expect("Headers should be UTF-8");
        assert_eq!(headers, "\na:\n\nc:\n");
    }

    #[test]
    #[serial]
    fn test_scan_output_is_idempotent() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        touch_manifest(tmp.path(), "a");
        touch_manifest(tmp.path(), "b");

        let mut first = Vec::new();
        run_with_output(tmp.path(), &mut first).expect("First scan failed");
        let mut second = Vec::new();
        run_with_output(tmp.path(), &mut second).expect("Second scan failed");

        assert_eq!(
            first, second,
            "Two scans over an unchanged tree must emit identical headers"
        );
    }

    #[test]
    #[serial]
    fn test_scan_empty_tree_is_silent_and_ok() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let cwd = env::current_dir().expect("Failed to read working dir");

        let mut out = Vec::new();
        run_with_output(tmp.path(), &mut out).expect("Scan over an empty tree should succeed");

        assert!(out.is_empty(), "An empty tree must produce no output");
        assert_eq!(
            env::current_dir().expect("Failed to read working dir"),
            cwd,
            "Scan must not leak a working-directory change"
        );
    }

    #[test]
    #[serial]
    fn test_scan_continues_past_query_failures_and_restores_cwd() {
        // Stub crates have no compiled artifacts, so the query fails in
        // every directory. The loop must still visit all of them and
        // leave the working directory untouched.
        let tmp = TempDir::new().expect("Failed to create temp dir");
        touch_manifest(tmp.path(), "a");
        touch_manifest(tmp.path(), "b");

        let cwd = env::current_dir().expect("Failed to read working dir");

        run(tmp.path()).expect("Scan should succeed despite query failures");

        assert_eq!(
            env::current_dir().expect("Failed to read working dir"),
            cwd,
            "Scan must restore the working directory after every crate"
        );
    }

    #[test]
    #[serial]
    fn test_scan_skips_excluded_component() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        touch_manifest(tmp.path(), "raspi3_boot");

        let mut out = Vec::new();
        run_with_output(tmp.path(), &mut out).expect("Scan over an all-excluded tree should succeed");

        assert!(
            out.is_empty(),
            "Excluded crates must produce no header at all"
        );
    }
}
