//! Reconcile command: load the table and stores, run the engine, write
//! the reconciled dataset.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use fieldbench_io::{load_observations, load_outputs_dir, load_table};
use fieldbench_recon::ReconcilePlan;

use crate::cli::ReconcileArgs;

pub fn run(args: ReconcileArgs) -> Result<()> {
    let toml_str = std::fs::read_to_string(&args.plan)
        .with_context(|| format!("failed to read plan file: {}", args.plan.display()))?;
    let plan = ReconcilePlan::from_toml(&toml_str)
        .with_context(|| format!("invalid reconcile plan: {}", args.plan.display()))?;

    let base = plan_dir(&args.plan);
    let table = load_table(&resolve(&base, &plan.inputs.table))?;
    let sims = load_outputs_dir(&resolve(&base, &plan.inputs.outputs_dir))?;
    let soil = plan.inputs.soil_observations.as_ref().map(|p| resolve(&base, p));
    let observations = load_observations(
        &resolve(&base, &plan.inputs.crop_observations),
        soil.as_deref(),
        plan.derived.as_ref(),
    )?;

    info!(plan = %plan.name, treatments = sims.len(), "reconciling");
    let result = fieldbench_recon::run(&plan, &table, &sims, &observations)?;

    let output = args
        .output
        .unwrap_or_else(|| base.join("reconciled.json"));
    let json = serde_json::to_string_pretty(&result).context("serializing reconciled dataset")?;
    std::fs::write(&output, json)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{}: {} treatments, {} entries -> {}",
        plan.name, result.summary.treatments, result.summary.entries, output.display()
    );
    for pair in &result.pairs {
        println!("  {}: {} complete pairs", pair.variable, pair.observed.len());
    }
    for warning in &result.warnings {
        eprintln!("  skipped {}: {}", warning.treatment, warning.reason);
    }
    Ok(())
}

fn plan_dir(plan_path: &Path) -> PathBuf {
    plan_path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf()
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
