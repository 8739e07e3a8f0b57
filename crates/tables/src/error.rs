use std::fmt;

#[derive(Debug)]
pub enum TableError {
    /// Attribute row sets disagree across input sheets, or a sheet is
    /// internally malformed (ragged rows, duplicate attribute names).
    SchemaMismatch { site: String, detail: String },
    /// Treatment id collision while concatenating or expanding.
    DuplicateTreatment { treatment: String },
    /// A required attribute row is absent from the assembled table.
    MissingAttribute { attribute: String },
    /// TOML parse / deserialization error in an assembly plan.
    PlanParse(String),
    /// Assembly plan failed validation.
    PlanValidation(String),
    /// Export or snapshot form could not be read back.
    Parse(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaMismatch { site, detail } => {
                write!(f, "schema mismatch in sheet '{site}': {detail}")
            }
            Self::DuplicateTreatment { treatment } => {
                write!(f, "duplicate treatment id '{treatment}'")
            }
            Self::MissingAttribute { attribute } => {
                write!(f, "missing attribute row '{attribute}'")
            }
            Self::PlanParse(msg) => write!(f, "plan parse error: {msg}"),
            Self::PlanValidation(msg) => write!(f, "plan validation error: {msg}"),
            Self::Parse(msg) => write!(f, "table form parse error: {msg}"),
        }
    }
}

impl std::error::Error for TableError {}
