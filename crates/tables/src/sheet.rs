use std::collections::HashSet;

use crate::error::TableError;

/// One site's configuration sheet: attribute rows by treatment columns.
///
/// The source spreadsheet carries attribute labels in its first column
/// ("Name") and one column per treatment grown at that site.
#[derive(Debug, Clone)]
pub struct SiteSheet {
    pub site: String,
    pub attributes: Vec<String>,
    pub treatments: Vec<String>,
    /// `values[a][t]`, row-major by attribute, then treatment.
    pub values: Vec<Vec<String>>,
}

impl SiteSheet {
    /// Build a sheet, rejecting ragged rows and duplicate labels.
    pub fn new(
        site: impl Into<String>,
        attributes: Vec<String>,
        treatments: Vec<String>,
        values: Vec<Vec<String>>,
    ) -> Result<Self, TableError> {
        let site = site.into();

        if values.len() != attributes.len() {
            return Err(TableError::SchemaMismatch {
                site,
                detail: format!(
                    "{} attribute rows but {} value rows",
                    attributes.len(),
                    values.len()
                ),
            });
        }
        for (attr, row) in attributes.iter().zip(&values) {
            if row.len() != treatments.len() {
                return Err(TableError::SchemaMismatch {
                    site,
                    detail: format!(
                        "attribute '{attr}' has {} values for {} treatments",
                        row.len(),
                        treatments.len()
                    ),
                });
            }
        }

        let mut seen = HashSet::new();
        for attr in &attributes {
            if !seen.insert(attr.as_str()) {
                return Err(TableError::SchemaMismatch {
                    site,
                    detail: format!("duplicate attribute row '{attr}'"),
                });
            }
        }
        let mut seen = HashSet::new();
        for t in &treatments {
            if !seen.insert(t.as_str()) {
                return Err(TableError::DuplicateTreatment {
                    treatment: t.clone(),
                });
            }
        }

        Ok(Self {
            site,
            attributes,
            treatments,
            values,
        })
    }
}
