use std::fmt;

/// Ingest failures. Every variant names the offending source so a bad
/// row in one file out of dozens is diagnosable from the message alone.
#[derive(Debug)]
pub enum StoreError {
    /// Input is missing a required column.
    MissingColumn { source: String, column: String },
    /// A date cell matched no accepted calendar shape.
    DateParse { source: String, row: usize, value: String },
    /// A value cell is neither blank nor numeric.
    ValueParse {
        source: String,
        row: usize,
        column: String,
        value: String,
    },
    /// Malformed CSV (ragged record, bad quoting).
    Csv { source: String, detail: String },
    /// Two simulated artifacts claim the same treatment.
    DuplicateSeries { treatment: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn { source, column } => {
                write!(f, "{source}: missing column '{column}'")
            }
            Self::DateParse { source, row, value } => {
                write!(f, "{source}, row {row}: cannot parse date '{value}'")
            }
            Self::ValueParse {
                source,
                row,
                column,
                value,
            } => {
                write!(f, "{source}, row {row}, column '{column}': cannot parse value '{value}'")
            }
            Self::Csv { source, detail } => write!(f, "{source}: {detail}"),
            Self::DuplicateSeries { treatment } => {
                write!(f, "duplicate simulated series for treatment '{treatment}'")
            }
        }
    }
}

impl std::error::Error for StoreError {}
