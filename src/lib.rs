//! Core library entry for the `reorg-entitlements` CLI.
//!
//! A sync run reads the reorg file, resolves each payroll id to an identity,
//! gathers its roles and account entitlements, checks the declared
//! department and team, then writes a snapshot and the reports.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod fetch;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod ports;
pub mod reconcile;
pub mod report;
pub mod sources;

#[cfg(test)]
pub(crate) mod fake;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli)
}
