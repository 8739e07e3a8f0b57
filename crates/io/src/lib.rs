//! `fieldbench-io` — file-level I/O for the validation pipeline.
//!
//! Reads trial workbooks into site sheets, simulated-output directories
//! into a [`fieldbench_store::TimeSeriesStore`], observation files into
//! an [`fieldbench_store::ObservationStore`], and persists/reloads the
//! two configuration-table forms. All paths are explicit parameters;
//! nothing here consults the environment.

pub mod error;
pub mod observed;
pub mod outputs;
pub mod persist;
pub mod workbook;

pub use error::IoError;
pub use observed::load_observations;
pub use outputs::load_outputs_dir;
pub use persist::{load_table, write_export, write_snapshot};
pub use workbook::load_site_sheets;
