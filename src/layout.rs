// 🗂️ Column Layout - positional roles of a course table
// Defaults match the standard timetable workbook; a JSON file can override
// any subset of columns.

use crate::error::ExtractError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// Raw course-code probe used to find the first data row
    pub probe: usize,
    pub course_code: usize,
    pub course_title: usize,
    pub lecture_credits: usize,
    pub practical_credits: usize,
    pub unit_credits: usize,
    pub section_id: usize,
    pub instructor: usize,
    pub room: usize,
    pub timing: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout {
            probe: 0,
            course_code: 1,
            course_title: 2,
            lecture_credits: 3,
            practical_credits: 4,
            unit_credits: 5,
            section_id: 6,
            instructor: 7,
            room: 8,
            timing: 9,
        }
    }
}

impl ColumnLayout {
    /// Load layout from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read layout file: {:?}", path.as_ref()))?;

        let layout: ColumnLayout =
            serde_json::from_str(&content).context("Failed to parse layout JSON")?;

        layout.validate()?;
        Ok(layout)
    }

    /// Continuation detection needs the section and probe columns to differ
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.section_id == self.probe {
            return Err(ExtractError::InvalidLayout(format!(
                "section_id and probe both point at column {}",
                self.section_id
            )));
        }
        Ok(())
    }

    /// Minimum grid width this layout can read
    pub fn width(&self) -> usize {
        [
            self.probe,
            self.course_code,
            self.course_title,
            self.lecture_credits,
            self.practical_credits,
            self.unit_credits,
            self.section_id,
            self.instructor,
            self.room,
            self.timing,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}
