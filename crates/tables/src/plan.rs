use serde::Deserialize;

use crate::assemble::Expansion;
use crate::error::TableError;

/// Declarative assembly plan, one per test set.
///
/// Everything the spreadsheet convention used to leave implicit is a
/// declared, validated field here: the ordered site sheets, the row cap,
/// and the unnamed-column filter.
#[derive(Debug, Deserialize)]
pub struct AssemblyPlan {
    pub name: String,
    /// Workbook holding one sheet per site (.xlsx, or a directory of
    /// same-shaped CSV files; `fieldbench-io` dispatches on the path).
    pub workbook: String,
    /// Site sheets to merge, in order. The first sheet fixes attribute
    /// order; under expansion it also provides the base table.
    pub sheets: Vec<String>,
    /// Attribute rows read per sheet; rows beyond the cap are ignored.
    pub row_cap: usize,
    /// Discard columns with blank or placeholder ("Unnamed…") headers.
    #[serde(default = "default_drop_unnamed")]
    pub drop_unnamed: bool,
    #[serde(default)]
    pub expansion: Option<Expansion>,
}

fn default_drop_unnamed() -> bool {
    true
}

impl AssemblyPlan {
    pub fn from_toml(input: &str) -> Result<Self, TableError> {
        let plan: AssemblyPlan =
            toml::from_str(input).map_err(|e| TableError::PlanParse(e.to_string()))?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.sheets.is_empty() {
            return Err(TableError::PlanValidation("no site sheets listed".into()));
        }
        if self.row_cap == 0 {
            return Err(TableError::PlanValidation("row_cap must be at least 1".into()));
        }
        if let Some(ref exp) = self.expansion {
            exp.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WS1_PLAN: &str = r#"
name = "WS1"
workbook = "TestSets/WS1/FieldConfigs.xlsx"
sheets = ["LincolnRot1", "LincolnRot2", "HawksBayRot3", "HawksBayRot4"]
row_cap = 45

[expansion]
canonical = "N1"
alternates = ["N2", "N3", "N4"]
"#;

    #[test]
    fn parses_full_plan() {
        let plan = AssemblyPlan::from_toml(WS1_PLAN).unwrap();
        assert_eq!(plan.name, "WS1");
        assert_eq!(plan.sheets.len(), 4);
        assert_eq!(plan.row_cap, 45);
        assert!(plan.drop_unnamed);
        let exp = plan.expansion.unwrap();
        assert_eq!(exp.canonical, "N1");
        assert_eq!(exp.alternates, vec!["N2", "N3", "N4"]);
        assert_eq!(exp.delimiter, '_');
    }

    #[test]
    fn expansion_is_optional() {
        let plan = AssemblyPlan::from_toml(
            r#"
name = "WS2"
workbook = "TestSets/WS2/FieldConfigs.xlsx"
sheets = ["Wilcox"]
row_cap = 45
"#,
        )
        .unwrap();
        assert!(plan.expansion.is_none());
    }

    #[test]
    fn rejects_empty_sheet_list() {
        let err = AssemblyPlan::from_toml(
            r#"
name = "Bad"
workbook = "x.xlsx"
sheets = []
row_cap = 45
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no site sheets"));
    }

    #[test]
    fn rejects_zero_row_cap() {
        let err = AssemblyPlan::from_toml(
            r#"
name = "Bad"
workbook = "x.xlsx"
sheets = ["A"]
row_cap = 0
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("row_cap"));
    }

    #[test]
    fn rejects_alternate_equal_to_canonical() {
        let err = AssemblyPlan::from_toml(
            r#"
name = "Bad"
workbook = "x.xlsx"
sheets = ["A"]
row_cap = 45

[expansion]
canonical = "N1"
alternates = ["N1"]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("canonical"));
    }
}
