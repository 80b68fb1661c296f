// 🧮 Grid Preprocessor - merged-cell fill and data-start detection
// A table arrives as a rectangular grid of optional scalars; this module
// reproduces downward merged-cell display and finds where course data begins.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CELL VALUES
// ============================================================================

/// CellValue - one non-empty scalar read from a table
///
/// Absent cells are modelled as `None` in the grid, never as an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }

    /// Canonical text form: strings verbatim, integral numbers without ".0"
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

// ============================================================================
// COURSE CODE CLASSIFICATION
// ============================================================================

/// Result of probing a cell for a course code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseCode {
    Valid(i64),
    NotACode,
}

impl CourseCode {
    pub fn is_valid(&self) -> bool {
        matches!(self, CourseCode::Valid(_))
    }
}

/// Classify a cell as a course code
///
/// A value is a course code iff it converts losslessly to an integer:
/// - Text: trimmed, optional sign, base-10 digits ("101", " 42 ", "+7")
/// - Number: finite and integral (101.0 yes, 101.5 no)
pub fn classify_course_code(value: Option<&CellValue>) -> CourseCode {
    match value {
        Some(CellValue::Text(s)) => match s.trim().parse::<i64>() {
            Ok(code) => CourseCode::Valid(code),
            Err(_) => CourseCode::NotACode,
        },
        Some(CellValue::Number(n)) => {
            if n.is_finite() && n.fract() == 0.0 && n.abs() <= i64::MAX as f64 {
                CourseCode::Valid(*n as i64)
            } else {
                CourseCode::NotACode
            }
        }
        None => CourseCode::NotACode,
    }
}

// ============================================================================
// GRID
// ============================================================================

/// Grid - rectangular table of optional cells, addressed by (row, column)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: Vec<Vec<Option<CellValue>>>,
    width: usize,
}

impl Grid {
    /// Build a grid, padding short rows with empty cells
    pub fn new(mut rows: Vec<Vec<Option<CellValue>>>) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        for row in rows.iter_mut() {
            row.resize(width, None);
        }
        Grid { rows, width }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (row, col); out-of-range positions read as empty
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// Forward-fill every column independently
    ///
    /// Each empty cell takes the nearest non-empty value above it in the same
    /// column. Leading empties stay empty. Returns a new grid; `self` is untouched.
    pub fn forward_fill(&self) -> Grid {
        let mut last_seen: Vec<Option<CellValue>> = vec![None; self.width];
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(col, cell)| match cell {
                        Some(value) => {
                            last_seen[col] = Some(value.clone());
                            Some(value.clone())
                        }
                        None => last_seen[col].clone(),
                    })
                    .collect()
            })
            .collect();

        Grid {
            rows,
            width: self.width,
        }
    }

    /// Index of the first row whose `probe_col` cell is a course code
    ///
    /// `None` means the table holds no course data and must be skipped.
    pub fn find_data_start(&self, probe_col: usize) -> Option<usize> {
        (0..self.height()).find(|&row| classify_course_code(self.cell(row, probe_col)).is_valid())
    }
}

// ============================================================================
// TESTS
// ============================================================================
