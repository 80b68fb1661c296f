// Timetable Extract - Core Library
// Turns loosely formatted course tables into normalized course records.
// Exposes all modules for use in the CLI and tests.

pub mod grid;
pub mod timeslot;
pub mod aggregator;
pub mod diagnostics;
pub mod error;
pub mod layout;
pub mod extractor;
pub mod source;

// Re-export commonly used types
pub use grid::{classify_course_code, CellValue, CourseCode, Grid};
pub use timeslot::{parse_time_slots, slot_timing, Day, ParsedTiming, TimeSlot, SLOT_TIMES};
pub use aggregator::{CourseRecord, Credits, SectionAggregator, SectionKey, SectionRecord, SectionType};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::ExtractError;
pub use layout::ColumnLayout;
pub use extractor::{BatchReport, TableExtraction, TimetableExtractor};
pub use source::{detect_source, grid_from_csv_reader, CsvTableSource, NamedTable, TableSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
