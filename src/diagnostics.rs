// 🩺 Diagnostics - explicit warning sink
// Each table gets its own collector, so parallel tables never share state.
// Entries are forwarded to the `log` facade as they are recorded.

use crate::error::ExtractError;
use serde::{Deserialize, Serialize};

// ============================================================================
// DIAGNOSTIC
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Table skipped: no course code in the probe column
    NoDataFound,
    /// Table skipped: header fields out of range
    MissingColumns,
    /// Timing token dropped: not a day and no digits
    UnparseableSlotToken,
}

impl DiagnosticKind {
    /// True when the whole table was dropped
    pub fn is_table_level(&self) -> bool {
        matches!(self, DiagnosticKind::NoDataFound | DiagnosticKind::MissingColumns)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    /// 0-based grid row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,

    pub message: String,
}

impl Diagnostic {
    pub fn from_error(error: &ExtractError) -> Self {
        let kind = match error {
            ExtractError::MissingColumns { .. } | ExtractError::InvalidLayout(_) => {
                DiagnosticKind::MissingColumns
            }
            ExtractError::NoDataFound { .. } => DiagnosticKind::NoDataFound,
        };
        Diagnostic {
            kind,
            table: error.table().map(str::to_string),
            row: None,
            message: error.to_string(),
        }
    }
}

// ============================================================================
// SINK
// ============================================================================

/// Diagnostics - append-only collector scoped to one table
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    table: Option<String>,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Collector whose entries are tagged with a table name
    pub fn for_table(table: &str) -> Self {
        Diagnostics {
            table: Some(table.to_string()),
            entries: Vec::new(),
        }
    }

    /// Record a token-level warning at a grid row
    pub fn warn(&mut self, kind: DiagnosticKind, row: Option<usize>, message: String) {
        match &self.table {
            Some(table) => log::warn!("[{}] {}", table, message),
            None => log::warn!("{}", message),
        }
        self.entries.push(Diagnostic {
            kind,
            table: self.table.clone(),
            row,
            message,
        });
    }

    /// Record a table-level failure
    pub fn record_error(&mut self, error: &ExtractError) {
        log::error!("{}", error);
        self.entries.push(Diagnostic::from_error(error));
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
