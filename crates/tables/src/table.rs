use std::collections::HashSet;

use crate::error::TableError;

/// Attribute rows the assembler requires for every table: the bounds of
/// each treatment's harvest window.
pub const REQUIRED_ATTRIBUTES: &[&str] = &["PriorHarvestDate", "CurrentHarvestDate"];

/// The assembled attribute-name × treatment configuration table.
///
/// Built once by [`crate::assemble`] or reloaded from a persisted form,
/// then held read-only: attribute values are opaque pass-through strings
/// except where a consumer parses them (harvest dates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationTable {
    attributes: Vec<String>,
    treatments: Vec<String>,
    /// `values[a][t]`, attribute-major, matching the snapshot form.
    values: Vec<Vec<String>>,
}

impl ConfigurationTable {
    /// Assemble-from-parts with invariant checks: rectangular, no
    /// duplicate attribute names, no duplicate treatment ids.
    pub fn from_parts(
        attributes: Vec<String>,
        treatments: Vec<String>,
        values: Vec<Vec<String>>,
    ) -> Result<Self, TableError> {
        if values.len() != attributes.len() {
            return Err(TableError::Parse(format!(
                "{} attribute rows but {} value rows",
                attributes.len(),
                values.len()
            )));
        }
        for (attr, row) in attributes.iter().zip(&values) {
            if row.len() != treatments.len() {
                return Err(TableError::Parse(format!(
                    "attribute '{attr}' has {} values for {} treatments",
                    row.len(),
                    treatments.len()
                )));
            }
        }

        let mut seen = HashSet::new();
        for attr in &attributes {
            if !seen.insert(attr.as_str()) {
                return Err(TableError::SchemaMismatch {
                    site: String::new(),
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
            attributes,
            treatments,
            values,
        })
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn treatments(&self) -> &[String] {
        &self.treatments
    }

    pub fn has_treatment(&self, treatment: &str) -> bool {
        self.treatments.iter().any(|t| t == treatment)
    }

    /// The cell for (attribute, treatment), if both exist. A present but
    /// empty cell returns `Some("")`; blankness is the caller's concern.
    pub fn value(&self, attribute: &str, treatment: &str) -> Option<&str> {
        let a = self.attributes.iter().position(|x| x == attribute)?;
        let t = self.treatments.iter().position(|x| x == treatment)?;
        Some(self.values[a][t].as_str())
    }

    pub(crate) fn rows(&self) -> &[Vec<String>] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> ConfigurationTable {
        ConfigurationTable::from_parts(
            vec!["PriorHarvestDate".into(), "CurrentHarvestDate".into(), "SoilOrder".into()],
            vec!["S1_N1_Irr1_Wheat".into(), "S1_N2_Irr1_Wheat".into()],
            vec![
                vec!["2020-02-01".into(), "2020-02-01".into()],
                vec!["2020-03-01".into(), "2020-03-01".into()],
                vec!["Brown".into(), "Brown".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn value_lookup() {
        let t = small_table();
        assert_eq!(t.value("SoilOrder", "S1_N1_Irr1_Wheat"), Some("Brown"));
        assert_eq!(t.value("SoilOrder", "S9_N1_Irr1_Wheat"), None);
        assert_eq!(t.value("NoSuchRow", "S1_N1_Irr1_Wheat"), None);
    }

    #[test]
    fn duplicate_treatment_rejected() {
        let err = ConfigurationTable::from_parts(
            vec!["A".into()],
            vec!["T1".into(), "T1".into()],
            vec![vec!["1".into(), "2".into()]],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::DuplicateTreatment { .. }));
    }
}
