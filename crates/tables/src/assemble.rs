use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use tracing::debug;

use crate::error::TableError;
use crate::sheet::SiteSheet;
use crate::table::{ConfigurationTable, REQUIRED_ATTRIBUTES};

/// Facet-expansion directive: replicate a base table built at one
/// canonical facet level (e.g. "N1") across alternate levels, rewriting
/// the delimiter-wrapped token in every column name ("_N1_" → "_N2_").
///
/// One site-level fact sheet entered at the canonical nutrient rate
/// stands in for all rate variants without re-entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Expansion {
    pub canonical: String,
    pub alternates: Vec<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_delimiter() -> char {
    '_'
}

impl Expansion {
    fn wrapped(&self, token: &str) -> String {
        format!("{d}{token}{d}", d = self.delimiter)
    }

    /// Rewrite one column name for an alternate level. A name not
    /// containing the wrapped canonical token passes through unchanged.
    pub fn rewrite(&self, column: &str, alternate: &str) -> String {
        column.replace(&self.wrapped(&self.canonical), &self.wrapped(alternate))
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.canonical.is_empty() {
            return Err(TableError::PlanValidation(
                "expansion canonical token is empty".into(),
            ));
        }
        if self.alternates.is_empty() {
            return Err(TableError::PlanValidation(
                "expansion has no alternate tokens".into(),
            ));
        }
        if self.alternates.iter().any(|a| a == &self.canonical) {
            return Err(TableError::PlanValidation(format!(
                "alternate token equals canonical token '{}'",
                self.canonical
            )));
        }
        Ok(())
    }
}

/// Merge per-site sheets into one [`ConfigurationTable`], concatenating
/// along the treatment axis, then apply the expansion directive if any.
///
/// Attribute order follows the first sheet; later sheets must carry the
/// same attribute set (any order) or the merge fails with
/// `SchemaMismatch`. Treatment ids must be unique across the whole
/// union, expansion output included.
pub fn assemble(
    sheets: &[SiteSheet],
    expansion: Option<&Expansion>,
) -> Result<ConfigurationTable, TableError> {
    let first = sheets.first().ok_or_else(|| TableError::SchemaMismatch {
        site: String::new(),
        detail: "no input sheets".into(),
    })?;
    if let Some(exp) = expansion {
        exp.validate()?;
    }

    let attributes = first.attributes.clone();
    let reference: HashSet<&str> = attributes.iter().map(String::as_str).collect();

    let mut treatments: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<String>> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for sheet in sheets {
        let here: HashSet<&str> = sheet.attributes.iter().map(String::as_str).collect();
        if here != reference {
            let missing: Vec<&str> = reference.difference(&here).copied().collect();
            let extra: Vec<&str> = here.difference(&reference).copied().collect();
            return Err(TableError::SchemaMismatch {
                site: sheet.site.clone(),
                detail: format!(
                    "attribute rows disagree with '{}' (missing: {missing:?}, extra: {extra:?})",
                    first.site
                ),
            });
        }

        // Align this sheet's rows to the reference attribute order.
        let row_of: HashMap<&str, usize> = sheet
            .attributes
            .iter()
            .enumerate()
            .map(|(i, a)| (a.as_str(), i))
            .collect();

        for (ti, treatment) in sheet.treatments.iter().enumerate() {
            if !seen.insert(treatment.clone()) {
                return Err(TableError::DuplicateTreatment {
                    treatment: treatment.clone(),
                });
            }
            let column: Vec<String> = attributes
                .iter()
                .map(|a| sheet.values[row_of[a.as_str()]][ti].clone())
                .collect();
            treatments.push(treatment.clone());
            columns.push(column);
        }
        debug!(site = %sheet.site, treatments = sheet.treatments.len(), "merged sheet");
    }

    if let Some(exp) = expansion {
        let base = treatments.len();
        for alternate in &exp.alternates {
            for i in 0..base {
                let renamed = exp.rewrite(&treatments[i], alternate);
                if !seen.insert(renamed.clone()) {
                    return Err(TableError::DuplicateTreatment { treatment: renamed });
                }
                treatments.push(renamed);
                columns.push(columns[i].clone());
            }
        }
    }

    for required in REQUIRED_ATTRIBUTES {
        if !attributes.iter().any(|a| a == required) {
            return Err(TableError::MissingAttribute {
                attribute: (*required).to_string(),
            });
        }
    }

    // Transpose column-major accumulation into the attribute-major form.
    let values: Vec<Vec<String>> = (0..attributes.len())
        .map(|a| columns.iter().map(|col| col[a].clone()).collect())
        .collect();

    ConfigurationTable::from_parts(attributes, treatments, values)
}
