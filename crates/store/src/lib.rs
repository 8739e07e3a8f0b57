//! `fieldbench-store` — read-only stores over the run's raw inputs.
//!
//! [`TimeSeriesStore`] holds one simulated daily series per treatment;
//! [`ObservationStore`] holds sparse, deduplicated field measurements
//! per site/variable/date. Both ingest CSV text and are immutable once
//! loaded; neither interpolates, resamples, or estimates. An absent
//! date is absence, full stop.

pub mod error;
pub mod observations;
pub mod series;

pub use error::StoreError;
pub use observations::{DerivedVariable, ObservationStore};
pub use series::{SimulatedSeries, TimeSeriesStore};
