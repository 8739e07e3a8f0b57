use std::collections::BTreeMap;

use crate::model::{ReconSummary, ReconciledEntry, SkipWarning};

/// Compute run statistics from the reconciled entries.
pub fn compute_summary(
    reconciled_treatments: usize,
    entries: &[ReconciledEntry],
    warnings: &[SkipWarning],
    variables: &[String],
) -> ReconSummary {
    let mut complete_pairs: BTreeMap<String, usize> =
        variables.iter().map(|v| (v.clone(), 0)).collect();

    for entry in entries {
        if entry.is_complete() {
            if let Some(count) = complete_pairs.get_mut(&entry.variable) {
                *count += 1;
            }
        }
    }

    ReconSummary {
        treatments: reconciled_treatments,
        entries: entries.len(),
        complete_pairs,
        skipped: warnings.len(),
    }
}
