//! Workspace audit tool for the panic-formatting symbol.
//!
//! Locates every `Cargo.toml` under a workspace tree, skips the boot
//! component, and runs `cargo nm | grep panic_fmt` in each remaining
//! crate directory. The presence of `panic_fmt` in a compiled binary
//! means the panic-formatting code path was linked in.
//!
//! # Usage
//!
//! ```bash
//! panic-audit <command> [options]
//! ```
//!
//! # Commands
//!
//! - `scan [ROOT]` - Run the symbol query in every crate directory
//! - `list [ROOT]` - Print the crate directories that would be audited

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use panic_audit::tasks;

/// Workspace audit for the panic-formatting symbol.
#[derive(Parser)]
#[command(name = "panic-audit")]
#[command(about = "Audits workspace crates for the panic_fmt symbol", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available audit commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the symbol query in every crate directory.
    ///
    /// Walks the tree for build manifests, skips the boot component,
    /// and runs the symbol query with each remaining crate directory
    /// as working context. Query failures are reported and skipped.
    Scan {
        /// Root of the workspace tree to audit
        #[arg(default_value = ".")]
        root: PathBuf,
    },

    /// Print the crate directories that would be audited.
    ///
    /// Same discovery and ordering as `scan`, without running the
    /// symbol query. Useful for scripting.
    List {
        /// Root of the workspace tree to audit
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { root } => tasks::scan(&root),
        Commands::List { root } => tasks::list(&root),
    }
}
