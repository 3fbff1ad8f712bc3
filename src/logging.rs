//! Log file setup.
//!
//! All modules log through the `log` facade; this installs `env_logger` as
//! the backend, appending to `<dir>/reorg.log`.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

/// File name of the run log inside the log directory.
pub const LOG_FILE: &str = "reorg.log";

/// Installs the global logger writing to `<dir>/reorg.log`.
///
/// The level defaults to `info` and can be overridden with `RUST_LOG`.
/// Calling this more than once is harmless; later calls are ignored.
///
/// # Errors
///
/// Returns an error string if the directory or file cannot be created.
pub fn init(dir: &Path) -> Result<PathBuf, String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create log directory {}: {e}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("Failed to open log file {}: {e}", path.display()))?;

    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .try_init();

    log::info!("Logging setup complete.");
    Ok(path)
}
