//! Assemble command: per-site sheets to the persisted table forms.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use fieldbench_io::{load_site_sheets, write_export, write_snapshot};
use fieldbench_tables::{assemble, AssemblyPlan};

use crate::cli::AssembleArgs;

pub fn run(args: AssembleArgs) -> Result<()> {
    let toml_str = std::fs::read_to_string(&args.plan)
        .with_context(|| format!("failed to read plan file: {}", args.plan.display()))?;
    let plan = AssemblyPlan::from_toml(&toml_str)
        .with_context(|| format!("invalid assembly plan: {}", args.plan.display()))?;

    let base = plan_dir(&args.plan);
    let workbook = resolve(&base, &plan.workbook);

    info!(plan = %plan.name, workbook = %workbook.display(), "assembling configuration table");
    let sheets = load_site_sheets(&workbook, &plan.sheets, plan.row_cap, plan.drop_unnamed)?;
    let table = assemble(&sheets, plan.expansion.as_ref())?;

    let out_dir = args.out_dir.unwrap_or_else(|| base.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;
    let export_path = out_dir.join("FieldConfigs.csv");
    let snapshot_path = out_dir.join("FieldConfigs.json");
    write_export(&table, &export_path)?;
    write_snapshot(&table, &snapshot_path)?;

    println!(
        "{}: {} treatments x {} attributes -> {} + {}",
        plan.name,
        table.treatments().len(),
        table.attributes().len(),
        export_path.display(),
        snapshot_path.display()
    );
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
