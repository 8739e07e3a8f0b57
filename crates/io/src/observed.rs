//! Observation file ingest: crop observations plus, where the trial
//! sampled soil, soil observations carrying the depth-layer columns the
//! derived soil-mineral-N variable is summed from.

use std::path::Path;

use fieldbench_store::{DerivedVariable, ObservationStore};

use crate::error::IoError;

/// Load the observation store for a run. The derived variable applies
/// to the soil file, where its component columns live.
pub fn load_observations(
    crop: &Path,
    soil: Option<&Path>,
    derived: Option<&DerivedVariable>,
) -> Result<ObservationStore, IoError> {
    let mut store = ObservationStore::new();

    let content = read(crop)?;
    store.ingest_csv(&content, None, &crop.display().to_string())?;

    if let Some(soil) = soil {
        let content = read(soil)?;
        store.ingest_csv(&content, derived, &soil.display().to_string())?;
    }

    Ok(store)
}

fn read(path: &Path) -> Result<String, IoError> {
    std::fs::read_to_string(path).map_err(|e| IoError::Read {
        path: path.display().to_string(),
        detail: e.to_string(),
    })
}
