//! `fieldbench-recon` — observed/predicted reconciliation.
//!
//! Pure engine crate: receives the pre-loaded configuration table and
//! stores, returns the reconciled dataset. No CLI or IO dependencies.

pub mod engine;
pub mod error;
pub mod model;
pub mod plan;
pub mod summary;

pub use engine::run;
pub use error::ReconError;
pub use model::{PairedSeries, ReconResult, ReconciledEntry, SkipWarning};
pub use plan::{Policy, ReconcilePlan};
