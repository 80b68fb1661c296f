// 🏭 Timetable Extractor - batch driver
// Fill → find start → aggregate, once per table. A table that fails is
// logged and skipped; the rest of the batch carries on.

use crate::aggregator::{CourseRecord, SectionAggregator};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ExtractError;
use crate::grid::Grid;
use crate::layout::ColumnLayout;
use crate::source::NamedTable;
use serde::Serialize;

// ============================================================================
// RESULTS
// ============================================================================

/// TableExtraction - one table's record plus its warnings
#[derive(Debug, Clone)]
pub struct TableExtraction {
    pub course: CourseRecord,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// One record per extracted table, in table order
    pub courses: Vec<CourseRecord>,

    /// Names of tables that produced no record
    pub skipped: Vec<String>,

    pub diagnostics: Vec<Diagnostic>,
}

impl BatchReport {
    pub fn summary(&self) -> String {
        let sections: usize = self.courses.iter().map(|c| c.sections.len()).sum();
        format!(
            "Courses: {}, Sections: {}, Skipped tables: {}, Warnings: {}",
            self.courses.len(),
            sections,
            self.skipped.len(),
            self.diagnostics
                .iter()
                .filter(|d| !d.kind.is_table_level())
                .count()
        )
    }
}

// ============================================================================
// EXTRACTOR
// ============================================================================

pub struct TimetableExtractor {
    layout: ColumnLayout,
}

impl TimetableExtractor {
    pub fn new(layout: ColumnLayout) -> Self {
        TimetableExtractor { layout }
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Extract one table
    ///
    /// Takes only shared references, so tables can be handed to separate
    /// threads without coordination.
    pub fn extract_table(&self, name: &str, grid: &Grid) -> Result<TableExtraction, ExtractError> {
        let filled = grid.forward_fill();

        let start_row = filled
            .find_data_start(self.layout.probe)
            .ok_or_else(|| ExtractError::NoDataFound {
                table: name.to_string(),
            })?;
        log::debug!("{}: data starts at row {}", name, start_row);

        let mut diagnostics = Diagnostics::for_table(name);
        let course = SectionAggregator::new(&self.layout).aggregate(
            name,
            &filled,
            start_row,
            &mut diagnostics,
        )?;

        Ok(TableExtraction {
            course,
            diagnostics,
        })
    }

    /// Extract every table, skipping the ones with no usable data
    pub fn extract_batch(&self, tables: &[NamedTable]) -> BatchReport {
        let mut report = BatchReport::default();

        for table in tables {
            log::info!("Processing table: {}", table.name);
            match self.extract_table(&table.name, &table.grid) {
                Ok(extraction) => {
                    report.courses.push(extraction.course);
                    report.diagnostics.extend(extraction.diagnostics.into_entries());
                }
                Err(error) => {
                    let mut diagnostics = Diagnostics::for_table(&table.name);
                    diagnostics.record_error(&error);
                    report.skipped.push(table.name.clone());
                    report.diagnostics.extend(diagnostics.into_entries());
                }
            }
        }

        report
    }
}

impl Default for TimetableExtractor {
    fn default() -> Self {
        Self::new(ColumnLayout::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::grid::CellValue;

    fn cell(s: &str) -> Option<CellValue> {
        match s {
            "" => None,
            _ => Some(CellValue::text(s)),
        }
    }

    fn create_test_table(name: &str, code: &str) -> NamedTable {
        let rows = vec![
            vec!["COM COD", "COURSE NO", "TITLE", "L", "P", "U", "SEC", "INSTRUCTOR", "ROOM", "DAYS/H"],
            vec![code, code, "Course", "3", "0", "3", "L1", "Dr. A", "R1", "M W F 2"],
            vec!["", "", "", "", "", "", "", "Dr. B", "", ""],
        ];
        let grid = Grid::new(
            rows.into_iter()
                .map(|r| r.into_iter().map(cell).collect())
                .collect(),
        );
        NamedTable::new(name, grid)
    }

    #[test]
    fn test_extract_table() {
        let extractor = TimetableExtractor::default();
        let table = create_test_table("CS F111", "1021");

        let extraction = extractor.extract_table(&table.name, &table.grid).unwrap();

        assert_eq!(extraction.course.course_code, cell("1021"));
        assert_eq!(extraction.course.sections.len(), 1);
        assert_eq!(extraction.course.sections[0].instructors, vec!["Dr. A", "Dr. B"]);
        assert_eq!(extraction.course.sections[0].timing.len(), 3);
    }

    #[test]
    fn test_extract_table_no_data() {
        let extractor = TimetableExtractor::default();
        let table = create_test_table("Notes", "n/a");

        let err = extractor.extract_table(&table.name, &table.grid).unwrap_err();
        assert_eq!(
            err,
            ExtractError::NoDataFound {
                table: "Notes".to_string()
            }
        );
    }

    #[test]
    fn test_batch_skips_bad_table_and_keeps_order() {
        let extractor = TimetableExtractor::default();
        let tables = vec![
            create_test_table("A", "1"),
            create_test_table("B", "bad"),
            create_test_table("C", "3"),
        ];

        let report = extractor.extract_batch(&tables);

        let codes: Vec<Option<CellValue>> =
            report.courses.iter().map(|c| c.course_code.clone()).collect();
        assert_eq!(codes, vec![cell("1"), cell("3")]);
        assert_eq!(report.skipped, vec!["B".to_string()]);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::NoDataFound);
        assert_eq!(report.diagnostics[0].table.as_deref(), Some("B"));
    }

    #[test]
    fn test_batch_narrow_table_skipped() {
        let extractor = TimetableExtractor::default();
        let narrow = NamedTable::new("Narrow", Grid::new(vec![vec![cell("12"), cell("12")]]));

        let report = extractor.extract_batch(&[narrow, create_test_table("Ok", "5")]);

        assert_eq!(report.courses.len(), 1);
        assert_eq!(report.skipped, vec!["Narrow".to_string()]);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::MissingColumns);
    }

    #[test]
    fn test_summary() {
        let extractor = TimetableExtractor::default();
        let report = extractor.extract_batch(&[create_test_table("A", "1"), create_test_table("B", "x")]);

        assert_eq!(
            report.summary(),
            "Courses: 1, Sections: 1, Skipped tables: 1, Warnings: 0"
        );
    }
}
