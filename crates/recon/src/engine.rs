use chrono::NaiveDate;
use tracing::{debug, info, warn};

use fieldbench_core::HarvestWindow;
use fieldbench_store::{ObservationStore, TimeSeriesStore};
use fieldbench_tables::ConfigurationTable;

use crate::error::ReconError;
use crate::model::{ReconMeta, ReconResult, ReconciledEntry, SkipWarning};
use crate::plan::{Policy, ReconcilePlan};
use crate::summary::compute_summary;

/// Reconcile every treatment in the time-series store against the
/// observation store, per plan. Returns entries sorted by
/// (Site, Treatment, Date, Variable) plus the flat paired arrays.
pub fn run(
    plan: &ReconcilePlan,
    table: &ConfigurationTable,
    sims: &TimeSeriesStore,
    observations: &ObservationStore,
) -> Result<ReconResult, ReconError> {
    let mut entries: Vec<ReconciledEntry> = Vec::new();
    let mut warnings: Vec<SkipWarning> = Vec::new();
    let mut reconciled = 0usize;

    for treatment in sims.treatments() {
        match reconcile_treatment(plan, table, sims, observations, treatment) {
            Ok(mut treatment_entries) => {
                debug!(treatment, entries = treatment_entries.len(), "reconciled treatment");
                entries.append(&mut treatment_entries);
                reconciled += 1;
            }
            Err(err) => match plan.policy {
                Policy::Strict => return Err(err),
                Policy::Lenient => {
                    warn!(treatment, %err, "skipping treatment");
                    warnings.push(SkipWarning {
                        treatment: treatment.to_string(),
                        reason: err.to_string(),
                    });
                }
            },
        }
    }

    entries.sort_by(|a, b| {
        (&a.site, &a.treatment, a.date, &a.variable)
            .cmp(&(&b.site, &b.treatment, b.date, &b.variable))
    });

    let summary = compute_summary(reconciled, &entries, &warnings, &plan.variables);
    info!(
        treatments = summary.treatments,
        entries = summary.entries,
        skipped = summary.skipped,
        "reconciliation complete"
    );

    let pairs = paired_series(&entries, &plan.variables);

    Ok(ReconResult {
        meta: ReconMeta {
            plan_name: plan.name.clone(),
            policy: plan.policy,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        summary,
        entries,
        pairs,
        warnings,
    })
}

/// One treatment's entries: resolve the site, read the harvest window,
/// then emit one entry per observation date for each plan variable. The
/// predicted side comes from the simulated value at exactly that date,
/// and only inside the window.
fn reconcile_treatment(
    plan: &ReconcilePlan,
    table: &ConfigurationTable,
    sims: &TimeSeriesStore,
    observations: &ObservationStore,
    treatment: &str,
) -> Result<Vec<ReconciledEntry>, ReconError> {
    let resolution =
        plan.naming
            .resolve(treatment)
            .map_err(|err| ReconError::Unresolvable {
                treatment: treatment.to_string(),
                reason: err.to_string(),
            })?;
    let window = harvest_window(table, treatment)?;

    let Some(series) = sims.get(treatment) else {
        // Iteration came from the store, so the series exists; an empty
        // result is still the right answer if it ever does not.
        return Ok(Vec::new());
    };

    let mut entries = Vec::new();
    for variable in &plan.variables {
        for (date, observed) in observations.series(&resolution.site, variable) {
            let predicted = if window.contains(date) {
                series.value_at(variable, date)
            } else {
                None
            };
            entries.push(ReconciledEntry {
                site: resolution.site.clone(),
                treatment: treatment.to_string(),
                date,
                variable: variable.clone(),
                observed: Some(observed),
                predicted,
            });
        }
    }
    Ok(entries)
}

/// Read the treatment's harvest window from the configuration table.
/// An inverted window (prior > current) is carried as-is.
fn harvest_window(
    table: &ConfigurationTable,
    treatment: &str,
) -> Result<HarvestWindow, ReconError> {
    let prior = window_bound(table, treatment, "PriorHarvestDate")?;
    let current = window_bound(table, treatment, "CurrentHarvestDate")?;
    Ok(HarvestWindow::new(prior, current))
}

fn window_bound(
    table: &ConfigurationTable,
    treatment: &str,
    attribute: &str,
) -> Result<NaiveDate, ReconError> {
    let value = table
        .value(attribute, treatment)
        .ok_or_else(|| ReconError::MissingWindow {
            treatment: treatment.to_string(),
            attribute: attribute.to_string(),
            detail: "has no value in the configuration table".into(),
        })?;
    if value.trim().is_empty() {
        return Err(ReconError::MissingWindow {
            treatment: treatment.to_string(),
            attribute: attribute.to_string(),
            detail: "is blank in the configuration table".into(),
        });
    }
    fieldbench_core::dates::parse_date(value).ok_or_else(|| ReconError::MissingWindow {
        treatment: treatment.to_string(),
        attribute: attribute.to_string(),
        detail: format!("cannot be read as a date ('{value}')"),
    })
}

/// Flat aligned (observed, predicted) arrays per plan variable,
/// complete pairs only.
fn paired_series(
    entries: &[ReconciledEntry],
    variables: &[String],
) -> Vec<crate::model::PairedSeries> {
    variables
        .iter()
        .map(|variable| {
            let mut observed = Vec::new();
            let mut predicted = Vec::new();
            for entry in entries.iter().filter(|e| &e.variable == variable) {
                if let (Some(obs), Some(pred)) = (entry.observed, entry.predicted) {
                    observed.push(obs);
                    predicted.push(pred);
                }
            }
            crate::model::PairedSeries {
                variable: variable.clone(),
                observed,
                predicted,
            }
        })
        .collect()
}
