//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `reorg-entitlements`.
#[derive(Debug, Parser)]
#[command(
    name = "reorg-entitlements",
    version,
    about = "Reconcile a reorg file against the identity service and report entitlements"
)]
pub struct Cli {
    /// Directory receiving the run log.
    #[arg(long, global = true, env = "REORG_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process the reorg file, save the identity snapshot and export reports.
    Sync {
        /// Reorg CSV file.
        #[arg(long, env = "REORG_INPUT", default_value = "reorg.csv")]
        input: PathBuf,
        /// Output locations.
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Rebuild the reports from an existing identity snapshot.
    Export {
        /// Snapshot and report locations.
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Where the snapshot and reports live.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Identity snapshot file.
    #[arg(long, env = "REORG_SNAPSHOT", default_value = "all_identities.json")]
    pub snapshot: PathBuf,
    /// Reports directory.
    #[arg(long, env = "REORG_REPORTS", default_value = "reports")]
    pub reports: PathBuf,
}
