//! Simulated-output ingest: one CSV per treatment, named
//! `<TreatmentId>.csv`, in a single directory.

use std::path::Path;

use tracing::info;

use fieldbench_store::{SimulatedSeries, TimeSeriesStore};

use crate::error::IoError;

/// Load every `*.csv` in `dir` as one treatment's simulated series.
/// Files are visited in name order so duplicate detection and logging
/// are reproducible; the store itself keys by treatment id.
pub fn load_outputs_dir(dir: &Path) -> Result<TimeSeriesStore, IoError> {
    let entries = std::fs::read_dir(dir).map_err(|e| IoError::Read {
        path: dir.display().to_string(),
        detail: e.to_string(),
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut store = TimeSeriesStore::new();
    for path in &paths {
        let treatment = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let content = std::fs::read_to_string(path).map_err(|e| IoError::Read {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        let series =
            SimulatedSeries::from_csv(&treatment, &content, &path.display().to_string())?;
        store.insert(series)?;
    }

    info!(dir = %dir.display(), treatments = store.len(), "loaded simulated outputs");
    Ok(store)
}
