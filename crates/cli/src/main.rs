mod assemble_cmd;
mod cli;
mod logging;
mod reconcile_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Assemble(args) => assemble_cmd::run(args),
        Command::Reconcile(args) => reconcile_cmd::run(args),
    }
}
