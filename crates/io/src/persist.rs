//! Persisted configuration-table forms.
//!
//! The treatment-major CSV export and the attribute-major JSON snapshot
//! describe the identical logical table; `load_table` dispatches on the
//! file extension so consumers can hold either.

use std::path::Path;

use fieldbench_tables::{export, snapshot, ConfigurationTable};

use crate::error::IoError;

pub fn write_export(table: &ConfigurationTable, path: &Path) -> Result<(), IoError> {
    write(path, &export::to_export_csv(table))
}

pub fn write_snapshot(table: &ConfigurationTable, path: &Path) -> Result<(), IoError> {
    write(path, &snapshot::to_snapshot_json(table))
}

/// Reload a table from either persisted form: `.json` snapshots,
/// anything else as the CSV export.
pub fn load_table(path: &Path) -> Result<ConfigurationTable, IoError> {
    let content = std::fs::read_to_string(path).map_err(|e| IoError::Read {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    let table = if path.extension().is_some_and(|ext| ext == "json") {
        snapshot::from_snapshot_json(&content)?
    } else {
        export::from_export_csv(&content)?
    };
    Ok(table)
}

fn write(path: &Path, content: &str) -> Result<(), IoError> {
    std::fs::write(path, content).map_err(|e| IoError::Write {
        path: path.display().to_string(),
        detail: e.to_string(),
    })
}
