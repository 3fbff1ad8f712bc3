//! Binary entrypoint for the `reorg-entitlements` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Recording and replay are selected in commands via REORG_RECORD / REORG_REPLAY.
    match reorg_entitlements::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
