use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Field-trial validation driver.
#[derive(Parser)]
#[command(
    name = "fbench",
    version,
    about = "Assemble trial configurations and reconcile simulated output against observations"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Merge per-site sheets into the configuration table and persist
    /// both forms.
    Assemble(AssembleArgs),
    /// Reconcile simulated outputs against field observations.
    Reconcile(ReconcileArgs),
}

/// Arguments for the `assemble` subcommand.
#[derive(clap::Args)]
pub struct AssembleArgs {
    /// Path to the assembly plan TOML. Input paths in the plan are
    /// resolved relative to this file.
    #[arg(short, long)]
    pub plan: PathBuf,

    /// Directory for FieldConfigs.csv and FieldConfigs.json
    /// (defaults to the plan's directory).
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for the `reconcile` subcommand.
#[derive(clap::Args)]
pub struct ReconcileArgs {
    /// Path to the reconcile plan TOML. Input paths in the plan are
    /// resolved relative to this file.
    #[arg(short, long)]
    pub plan: PathBuf,

    /// Path for the reconciled-dataset JSON (defaults to
    /// reconciled.json beside the plan).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
