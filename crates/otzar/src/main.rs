//! Command-line interface for the otzar corpus search tools.

mod cli;

use std::process::ExitCode;

use clap::Parser;

use cli::args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build(cmd) => cli::commands::build::run(&cmd),
        Commands::Search(cmd) => cli::commands::search::run(&cmd),
    }
}
