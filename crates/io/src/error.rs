use std::fmt;

use fieldbench_store::StoreError;
use fieldbench_tables::TableError;

#[derive(Debug)]
pub enum IoError {
    /// File or directory could not be read.
    Read { path: String, detail: String },
    /// File could not be written.
    Write { path: String, detail: String },
    /// Workbook could not be opened, or a requested sheet is absent.
    Workbook { path: String, detail: String },
    /// Table-layer failure (schema mismatch, duplicate treatment, …).
    Table(TableError),
    /// Store-layer ingest failure.
    Store(StoreError),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, detail } => write!(f, "cannot read '{path}': {detail}"),
            Self::Write { path, detail } => write!(f, "cannot write '{path}': {detail}"),
            Self::Workbook { path, detail } => write!(f, "workbook '{path}': {detail}"),
            Self::Table(e) => write!(f, "{e}"),
            Self::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Table(e) => Some(e),
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TableError> for IoError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

impl From<StoreError> for IoError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
