//! Implementation of `otzar build`.

use std::process::ExitCode;

use otzar_index::build_index;

use crate::cli::args::BuildCommand;

/// Builds the index and prints a short summary.
pub fn run(cmd: &BuildCommand) -> ExitCode {
    match build_index(&cmd.db, &cmd.index) {
        Ok(stats) => {
            println!(
                "indexed {} documents in {:.2}s",
                stats.documents,
                stats.elapsed.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
