// 📥 Table Sources - load named grids for the extractor
// One CSV file is one table; a directory of CSV files is a batch.

use crate::grid::{CellValue, Grid};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

// ============================================================================
// CORE TYPES
// ============================================================================

/// NamedTable - one course table and the name it was loaded under
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTable {
    pub name: String,
    pub grid: Grid,
}

impl NamedTable {
    pub fn new(name: &str, grid: Grid) -> Self {
        NamedTable {
            name: name.to_string(),
            grid,
        }
    }
}

/// TableSource - anything that can turn a path into named grids
pub trait TableSource: Send + Sync {
    /// Load every table found at `path`, in a stable order
    fn load(&self, path: &Path) -> Result<Vec<NamedTable>>;

    fn name(&self) -> &str;
}

// ============================================================================
// CSV
// ============================================================================

/// Build a grid from header-less CSV data
///
/// Whitespace-only fields are empty cells. With `infer_numbers`, fields that
/// parse as finite numbers become `CellValue::Number`.
pub fn grid_from_csv_reader<R: Read>(reader: R, infer_numbers: bool) -> Result<Grid> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line_num, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to parse CSV line {}", line_num + 1))?;
        let row = record
            .iter()
            .map(|field| to_cell(field, infer_numbers))
            .collect();
        rows.push(row);
    }

    Ok(Grid::new(rows))
}

fn to_cell(field: &str, infer_numbers: bool) -> Option<CellValue> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return None;
    }
    if infer_numbers {
        if let Ok(number) = trimmed.parse::<f64>() {
            if number.is_finite() {
                return Some(CellValue::Number(number));
            }
        }
    }
    Some(CellValue::text(field))
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// CSV file or directory of CSV files
pub struct CsvTableSource {
    pub infer_numbers: bool,
}

impl CsvTableSource {
    pub fn new(infer_numbers: bool) -> Self {
        CsvTableSource { infer_numbers }
    }

    fn load_file(&self, path: &Path) -> Result<NamedTable> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        let grid = grid_from_csv_reader(file, self.infer_numbers)
            .with_context(|| format!("Failed to read table from {}", path.display()))?;
        Ok(NamedTable::new(&table_name(path), grid))
    }
}

impl TableSource for CsvTableSource {
    fn load(&self, path: &Path) -> Result<Vec<NamedTable>> {
        if !path.is_dir() {
            return Ok(vec![self.load_file(path)?]);
        }

        let mut files: Vec<PathBuf> = fs::read_dir(path)
            .with_context(|| format!("Failed to list directory: {}", path.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_csv(p))
            .collect();
        files.sort();

        if files.is_empty() {
            log::warn!("No CSV tables found in {}", path.display());
        }

        files.iter().map(|file| self.load_file(file)).collect()
    }

    fn name(&self) -> &str {
        "csv"
    }
}

// ============================================================================
// FACTORY
// ============================================================================

/// Pick a source for a path: a `.csv` file or a directory
pub fn detect_source(path: &Path, infer_numbers: bool) -> Result<Box<dyn TableSource>> {
    if path.is_dir() || is_csv(path) {
        return Ok(Box::new(CsvTableSource::new(infer_numbers)));
    }

    Err(anyhow::anyhow!(
        "Unsupported input (expected a .csv file or a directory): {}",
        path.display()
    ))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_csv_text() {
        let data = "TIMETABLE,,\n101,Intro, \nx,y\n";
        let grid = grid_from_csv_reader(data.as_bytes(), false).unwrap();

        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.cell(0, 1), None);
        assert_eq!(grid.cell(1, 0), Some(&CellValue::text("101")));
        assert_eq!(grid.cell(1, 2), None);
        assert_eq!(grid.cell(2, 2), None);
    }

    #[test]
    fn test_grid_from_csv_infers_numbers() {
        let data = "101,Intro,3,1.5,L1\n";
        let grid = grid_from_csv_reader(data.as_bytes(), true).unwrap();

        assert_eq!(grid.cell(0, 0), Some(&CellValue::Number(101.0)));
        assert_eq!(grid.cell(0, 3), Some(&CellValue::Number(1.5)));
        assert_eq!(grid.cell(0, 4), Some(&CellValue::text("L1")));
    }

    #[test]
    fn test_quoted_fields_keep_spaces() {
        let data = "\"M W  1 2\",\"Dr. A, B\"\n";
        let grid = grid_from_csv_reader(data.as_bytes(), false).unwrap();

        assert_eq!(grid.cell(0, 0), Some(&CellValue::text("M W  1 2")));
        assert_eq!(grid.cell(0, 1), Some(&CellValue::text("Dr. A, B")));
    }

    #[test]
    fn test_detect_source() {
        assert!(detect_source(Path::new("sheets/CS F111.csv"), false).is_ok());
        assert!(detect_source(Path::new("timetable.xlsx"), false).is_err());
    }

    #[test]
    fn test_table_name_from_stem() {
        assert_eq!(table_name(Path::new("/tmp/MATH F112.csv")), "MATH F112");
    }
}
