// ⚠️ Error kinds for table extraction
// Every variant is recoverable at the table level; none aborts a batch.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// No row carries a course code in the probe column
    #[error("no course data found in table '{table}'")]
    NoDataFound { table: String },

    /// Header fields can't be read because the grid is too narrow
    #[error("table '{table}' has {found} columns, layout needs {required}")]
    MissingColumns {
        table: String,
        required: usize,
        found: usize,
    },

    #[error("invalid column layout: {0}")]
    InvalidLayout(String),
}

impl ExtractError {
    /// Name of the table the error belongs to, if any
    pub fn table(&self) -> Option<&str> {
        match self {
            ExtractError::NoDataFound { table } => Some(table),
            ExtractError::MissingColumns { table, .. } => Some(table),
            ExtractError::InvalidLayout(_) => None,
        }
    }
}
