use clap::Parser;
use valuesim::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
