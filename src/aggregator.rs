// 📚 Section Aggregator - rows → course record
// Walks a table from its data-start row, opens or resumes sections by
// (section number, type), absorbs continuation rows and merges instructors
// and time slots without duplicates.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::ExtractError;
use crate::grid::{CellValue, Grid};
use crate::layout::ColumnLayout;
use crate::timeslot::{parse_time_slots, TimeSlot};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// SECTION TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Lecture,
    Tutorial,
    Practical,
    Unknown,
}

impl SectionType {
    /// Derive the type from a section id prefix: L, T, P
    ///
    /// Numeric ids and any other prefix are `Unknown`.
    pub fn from_id(section_id: &CellValue) -> Self {
        match section_id.as_str() {
            Some(id) if id.starts_with('L') => SectionType::Lecture,
            Some(id) if id.starts_with('T') => SectionType::Tutorial,
            Some(id) if id.starts_with('P') => SectionType::Practical,
            _ => SectionType::Unknown,
        }
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// Identity of a section within one course
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionKey {
    pub number: String,
    pub section_type: SectionType,
}

impl SectionKey {
    pub fn new(section_id: &CellValue, section_type: SectionType) -> Self {
        SectionKey {
            number: section_id.to_text(),
            section_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub section_type: SectionType,
    pub section_number: CellValue,
    pub instructors: Vec<String>,
    pub room: String,
    pub timing: Vec<TimeSlot>,
}

impl SectionRecord {
    pub fn new(section_number: CellValue, section_type: SectionType, room: String) -> Self {
        SectionRecord {
            section_type,
            section_number,
            instructors: Vec::new(),
            room,
            timing: Vec::new(),
        }
    }

    /// Append an instructor unless already listed
    pub fn add_instructor(&mut self, name: String) {
        if !self.instructors.contains(&name) {
            self.instructors.push(name);
        }
    }

    /// Append a time slot unless an equal one is already listed
    pub fn add_time_slot(&mut self, slot: TimeSlot) {
        if !self.timing.contains(&slot) {
            self.timing.push(slot);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    pub lecture: Option<CellValue>,
    pub practical: Option<CellValue>,
    pub units: Option<CellValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course_code: Option<CellValue>,
    pub course_title: Option<CellValue>,
    pub credits: Credits,
    pub sections: Vec<SectionRecord>,
}

// ============================================================================
// AGGREGATOR
// ============================================================================

pub struct SectionAggregator<'a> {
    layout: &'a ColumnLayout,
}

impl<'a> SectionAggregator<'a> {
    pub fn new(layout: &'a ColumnLayout) -> Self {
        SectionAggregator { layout }
    }

    /// Build the course record for one table
    ///
    /// `start_row` must come from `Grid::find_data_start`. Fails only when
    /// the grid is too narrow for the layout's header columns.
    pub fn aggregate(
        &self,
        table: &str,
        grid: &Grid,
        start_row: usize,
        diagnostics: &mut Diagnostics,
    ) -> Result<CourseRecord, ExtractError> {
        let layout = self.layout;
        if grid.width() < layout.width() {
            return Err(ExtractError::MissingColumns {
                table: table.to_string(),
                required: layout.width(),
                found: grid.width(),
            });
        }

        let header = |col: usize| grid.cell(start_row, col).cloned();
        let course_code = header(layout.course_code);
        let course_title = header(layout.course_title);
        let credits = Credits {
            lecture: header(layout.lecture_credits),
            practical: header(layout.practical_credits),
            units: header(layout.unit_credits),
        };

        log::info!("Extracting sections...");
        let mut sections: IndexMap<SectionKey, SectionRecord> = IndexMap::new();
        let mut idx = start_row;

        while idx < grid.height() {
            let Some(section_id) = grid.cell(idx, layout.section_id) else {
                idx += 1;
                continue;
            };

            let section_type = SectionType::from_id(section_id);
            let section = sections
                .entry(SectionKey::new(section_id, section_type))
                .or_insert_with(|| {
                    let room = grid
                        .cell(idx, layout.room)
                        .map(CellValue::to_text)
                        .unwrap_or_default();
                    SectionRecord::new(section_id.clone(), section_type, room)
                });
            self.absorb_row(grid, idx, section, diagnostics);

            let mut next = idx + 1;
            while next < grid.height() && self.is_continuation(grid, next) {
                self.absorb_row(grid, next, section, diagnostics);
                next += 1;
            }
            idx = next;
        }

        log::debug!("{}: {} sections", table, sections.len());

        Ok(CourseRecord {
            course_code,
            course_title,
            credits,
            sections: sections.into_values().collect(),
        })
    }

    /// No new section marker and no new course marker
    fn is_continuation(&self, grid: &Grid, row: usize) -> bool {
        grid.cell(row, self.layout.section_id).is_none() && grid.cell(row, self.layout.probe).is_none()
    }

    /// Merge one row's instructor and time slots into `section`
    fn absorb_row(
        &self,
        grid: &Grid,
        row: usize,
        section: &mut SectionRecord,
        diagnostics: &mut Diagnostics,
    ) {
        if let Some(instructor) = grid.cell(row, self.layout.instructor) {
            section.add_instructor(instructor.to_text());
        }

        let Some(timing) = grid.cell(row, self.layout.timing) else {
            return;
        };
        let parsed = parse_time_slots(&timing.to_text());
        for token in &parsed.rejected {
            diagnostics.warn(
                DiagnosticKind::UnparseableSlotToken,
                Some(row),
                format!(
                    "Unexpected slot value '{}' in time string '{}'",
                    token, parsed.normalized
                ),
            );
        }
        for slot in parsed.slots {
            section.add_time_slot(slot);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
