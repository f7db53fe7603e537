//! teesheet - Command-line tool for skin and gameskin sheets

use std::process::ExitCode;

use teesheet::cli;

fn main() -> ExitCode {
    cli::run()
}
