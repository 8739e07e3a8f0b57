use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::plan::Policy;

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// One reconciled data point: a (Site, Treatment, Date, Variable) key
/// with whichever of the observed and predicted sides exist. Neither
/// side is ever interpolated; absence is ordinary state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledEntry {
    pub site: String,
    pub treatment: String,
    pub date: NaiveDate,
    pub variable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted: Option<f64>,
}

impl ReconciledEntry {
    /// Usable for goodness-of-fit: both sides present.
    pub fn is_complete(&self) -> bool {
        self.observed.is_some() && self.predicted.is_some()
    }
}

// ---------------------------------------------------------------------------
// Paired arrays
// ---------------------------------------------------------------------------

/// Flat aligned arrays of the complete (observed, predicted) pairs for
/// one variable across every treatment: the hand-off shape for an
/// external goodness-of-fit layer.
#[derive(Debug, Clone, Serialize)]
pub struct PairedSeries {
    pub variable: String,
    pub observed: Vec<f64>,
    pub predicted: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Warnings + Summary
// ---------------------------------------------------------------------------

/// A treatment skipped under the lenient policy, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkipWarning {
    pub treatment: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub treatments: usize,
    pub entries: usize,
    /// Complete (observed, predicted) pair count per variable.
    pub complete_pairs: BTreeMap<String, usize>,
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub plan_name: String,
    pub policy: Policy,
    pub engine_version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    /// Sorted by (Site, Treatment, Date, Variable).
    pub entries: Vec<ReconciledEntry>,
    /// One per plan variable, in plan order.
    pub pairs: Vec<PairedSeries>,
    /// Empty under the strict policy.
    pub warnings: Vec<SkipWarning>,
}
