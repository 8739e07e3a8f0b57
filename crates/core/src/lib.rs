//! `fieldbench-core` — shared types for field-trial validation.
//!
//! Treatments, sites, facets, harvest windows, and the treatment-name
//! resolver. No IO; every other crate in the workspace builds on these.

pub mod dates;
pub mod error;
pub mod naming;
pub mod treatment;
pub mod window;

pub use error::NameError;
pub use naming::NameScheme;
pub use treatment::{Facets, Resolution};
pub use window::HarvestWindow;
