use serde::{Deserialize, Serialize};

use fieldbench_core::NameScheme;
use fieldbench_store::DerivedVariable;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level plan
// ---------------------------------------------------------------------------

/// Declarative reconcile plan, one per test set.
#[derive(Debug, Deserialize)]
pub struct ReconcilePlan {
    pub name: String,
    /// Variables compared between simulation and observation.
    pub variables: Vec<String>,
    #[serde(default)]
    pub policy: Policy,
    pub naming: NameScheme,
    pub inputs: InputConfig,
    /// Variable derived at observation ingest (aggregate soil mineral N).
    #[serde(default)]
    pub derived: Option<DerivedVariable>,
}

/// Input locations consumed by the loading layer. The engine itself
/// never touches the filesystem.
#[derive(Debug, Deserialize)]
pub struct InputConfig {
    /// Configuration table: snapshot .json or export .csv.
    pub table: String,
    /// Directory of per-treatment simulated outputs, `<TreatmentId>.csv`.
    pub outputs_dir: String,
    pub crop_observations: String,
    #[serde(default)]
    pub soil_observations: Option<String>,
}

// ---------------------------------------------------------------------------
// Failure policy
// ---------------------------------------------------------------------------

/// What a resolution or window failure does to the run: strict aborts
/// it whole, lenient skips the treatment and records a warning. An
/// explicit plan choice, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    Strict,
    Lenient,
}

impl Default for Policy {
    fn default() -> Self {
        Self::Strict
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconcilePlan {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let plan: ReconcilePlan =
            toml::from_str(input).map_err(|e| ReconError::PlanParse(e.to_string()))?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.variables.is_empty() {
            return Err(ReconError::PlanValidation(
                "no variables of interest listed".into(),
            ));
        }
        if let Some(ref derived) = self.derived {
            if derived.components.is_empty() {
                return Err(ReconError::PlanValidation(format!(
                    "derived variable '{}' has no component columns",
                    derived.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WS1_PLAN: &str = r#"
name = "WS1"
variables = ["CropN", "SoilMineralN"]
policy = "lenient"

[naming]
scheme = "token_delimited"
delimiter = "_"

[inputs]
table = "TestSets/WS1/FieldConfigs.json"
outputs_dir = "TestSets/WS1/Outputs"
crop_observations = "TestSets/WS1/CropData.csv"
soil_observations = "TestSets/WS1/SoilData.csv"

[derived]
name = "SoilMineralN"
components = ["SoilN0_15", "SoilN15_30"]
"#;

    #[test]
    fn parses_full_plan() {
        let plan = ReconcilePlan::from_toml(WS1_PLAN).unwrap();
        assert_eq!(plan.name, "WS1");
        assert_eq!(plan.variables, vec!["CropN", "SoilMineralN"]);
        assert_eq!(plan.policy, Policy::Lenient);
        assert_eq!(plan.naming, NameScheme::TokenDelimited { delimiter: '_' });
        assert_eq!(plan.inputs.soil_observations.as_deref(), Some("TestSets/WS1/SoilData.csv"));
        assert_eq!(plan.derived.unwrap().components.len(), 2);
    }

    #[test]
    fn policy_defaults_to_strict() {
        let plan = ReconcilePlan::from_toml(
            r#"
name = "WS2"
variables = ["CropN"]

[naming]
scheme = "prefix_numeric"

[inputs]
table = "t.json"
outputs_dir = "Outputs"
crop_observations = "CropData.csv"
"#,
        )
        .unwrap();
        assert_eq!(plan.policy, Policy::Strict);
        assert!(plan.inputs.soil_observations.is_none());
    }

    #[test]
    fn rejects_empty_variables() {
        let err = ReconcilePlan::from_toml(
            r#"
name = "Bad"
variables = []

[naming]
scheme = "prefix_numeric"

[inputs]
table = "t.json"
outputs_dir = "Outputs"
crop_observations = "CropData.csv"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("variables"));
    }

    #[test]
    fn rejects_componentless_derived() {
        let err = ReconcilePlan::from_toml(
            r#"
name = "Bad"
variables = ["CropN"]

[naming]
scheme = "prefix_numeric"

[inputs]
table = "t.json"
outputs_dir = "Outputs"
crop_observations = "CropData.csv"

[derived]
name = "SoilMineralN"
components = []
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("SoilMineralN"));
    }
}
