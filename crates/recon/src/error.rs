use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// Treatment id did not resolve under the selected naming scheme.
    Unresolvable { treatment: String, reason: String },
    /// A harvest-window bound is absent or unreadable for a treatment.
    MissingWindow {
        treatment: String,
        attribute: String,
        detail: String,
    },
    /// TOML parse / deserialization error in a reconcile plan.
    PlanParse(String),
    /// Reconcile plan failed validation.
    PlanValidation(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolvable { treatment, reason } => {
                write!(f, "unresolvable treatment '{treatment}': {reason}")
            }
            Self::MissingWindow {
                treatment,
                attribute,
                detail,
            } => {
                write!(f, "treatment '{treatment}': {attribute} {detail}")
            }
            Self::PlanParse(msg) => write!(f, "plan parse error: {msg}"),
            Self::PlanValidation(msg) => write!(f, "plan validation error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
