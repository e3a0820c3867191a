use clap::Parser;
use strategy_cli::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
