//! Command dispatch and handlers.

pub mod export;
pub mod sync;

use std::env;
use std::path::Path;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::{ReorgError, ReorgResult};
use crate::logging;

/// Serve the identity service from this cassette file instead of the network.
pub const REPLAY_ENV: &str = "REORG_REPLAY";
/// Record every identity-service call into a session under this directory.
pub const RECORD_ENV: &str = "REORG_RECORD";

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if logging cannot be set up or the selected
/// command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    logging::init(&cli.log_dir)?;
    match &cli.command {
        Command::Sync { input, output } => sync::run(input, output),
        Command::Export { output } => export::run(output),
    }
}

/// Builds the service context for a sync run.
///
/// `REORG_REPLAY` wins and needs no credentials. Otherwise the live service
/// is used, wrapped in a recorder when `REORG_RECORD` is set.
async fn service_context() -> ReorgResult<ServiceContext> {
    if let Ok(cassette) = env::var(REPLAY_ENV) {
        return ServiceContext::replaying(Path::new(&cassette));
    }

    let settings = Settings::from_env()?;
    let live = ServiceContext::live(&settings).await?;
    match env::var(RECORD_ENV) {
        Ok(root) => ServiceContext::recording(live.identity, Path::new(&root), &settings.base_url),
        Err(_) => Ok(live),
    }
}

fn runtime() -> ReorgResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ReorgError::InvalidConfig(format!("Failed to start async runtime: {e}")))
}
