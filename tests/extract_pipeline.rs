//! Integration tests: CSV text → grids → batch report → JSON

use pretty_assertions::assert_eq;
use serde_json::json;
use timetable_extract::{
    grid_from_csv_reader, CellValue, DiagnosticKind, Grid, NamedTable, TimetableExtractor,
};

fn table_from_csv(name: &str, csv: &str) -> NamedTable {
    NamedTable::new(name, grid_from_csv_reader(csv.as_bytes(), true).unwrap())
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_single_section_with_continuation() {
    let t = |s: &str| Some(CellValue::text(s));
    let n = |v: f64| Some(CellValue::Number(v));
    let grid = Grid::new(vec![
        vec![t("101"), t("101"), t("Intro"), n(3.0), n(1.0), n(4.0), None, None, None, None],
        vec![None, None, None, None, None, None, t("L1"), t("Dr. A"), t("R101"), t("M 1 2")],
        vec![None, None, None, None, None, None, None, t("Dr. B"), None, t("W 2")],
    ]);

    let report = TimetableExtractor::default().extract_batch(&[NamedTable::new("Intro", grid)]);

    assert_eq!(
        serde_json::to_value(&report.courses).unwrap(),
        json!([{
            "course_code": "101",
            "course_title": "Intro",
            "credits": {"lecture": 3.0, "practical": 1.0, "units": 4.0},
            "sections": [{
                "section_type": "lecture",
                "section_number": "L1",
                "instructors": ["Dr. A", "Dr. B"],
                "room": "R101",
                "timing": [
                    {"day": "M", "slots": [1, 2], "timings": ["8-9", "9-10"]},
                    {"day": "W", "slots": [2], "timings": ["9-10"]}
                ]
            }]
        }])
    );
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_realistic_sheet_from_csv() {
    let csv = "\
TIMETABLE 2024-25 SEMESTER I,,,,,,,,,
COM COD,COURSE NO.,COURSE TITLE,L,P,U,SEC,INSTRUCTOR-IN-CHARGE / Instructor,ROOM,DAYS/ HOURS
1184,CS F111,COMPUTER PROGRAMMING,3,1,4,L1,Dr. Rao,F105,M W F 2
,,,,,,,Prof. Iyer,,
,,,,,,L2,Dr. Shah,F106,T Th 3  S 4
,,,,,,T1,Dr. Rao,6101,S  TBA
,,,,,,P1,Dr. Menon,CP Lab,M 6 7 8
,,,,,,,Dr. Shah,,
";
    let report = TimetableExtractor::default().extract_batch(&[table_from_csv("CS F111", csv)]);

    assert_eq!(report.courses.len(), 1);
    let course = &report.courses[0];
    assert_eq!(course.course_code, Some(CellValue::text("CS F111")));

    let summary: Vec<(String, Vec<String>, usize)> = course
        .sections
        .iter()
        .map(|s| (s.section_number.to_text(), s.instructors.clone(), s.timing.len()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("L1".to_string(), vec!["Dr. Rao".to_string(), "Prof. Iyer".to_string()], 3),
            ("L2".to_string(), vec!["Dr. Shah".to_string()], 3),
            ("T1".to_string(), vec!["Dr. Rao".to_string()], 1),
            (
                "P1".to_string(),
                vec!["Dr. Menon".to_string(), "Dr. Shah".to_string()],
                1
            ),
        ]
    );

    // Numeric room comes back without a decimal point
    assert_eq!(course.sections[2].room.as_str(), "6101");

    // "TBA" is dropped with a warning, the day still gets an empty slot list
    assert_eq!(course.sections[2].timing[0].slots, Vec::<u32>::new());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::UnparseableSlotToken);
    assert_eq!(report.diagnostics[0].row, Some(5));
}

// ============================================================================
// Batch isolation
// ============================================================================

#[test]
fn test_bad_table_is_skipped() {
    let good = "7,MATH F111,MATHEMATICS I,3,0,3,L1,Dr. Bose,F101,M 1\n";
    let bad = "Notes,,,\nNo course here,,,\n";

    let tables = vec![
        table_from_csv("first", good),
        table_from_csv("notes", bad),
        table_from_csv("last", &good.replace("MATH F111", "MATH F112")),
    ];
    let report = TimetableExtractor::default().extract_batch(&tables);

    let codes: Vec<String> = report
        .courses
        .iter()
        .filter_map(|c| c.course_code.as_ref().map(|v| v.to_text()))
        .collect();
    assert_eq!(codes, vec!["MATH F111".to_string(), "MATH F112".to_string()]);
    assert_eq!(report.skipped, vec!["notes".to_string()]);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::NoDataFound);
}

#[test]
fn test_diagnostics_serialize() {
    let report = TimetableExtractor::default()
        .extract_batch(&[table_from_csv("empty", "a,b\n")]);

    assert_eq!(
        serde_json::to_value(&report.diagnostics).unwrap(),
        json!([{
            "kind": "no_data_found",
            "table": "empty",
            "message": "no course data found in table 'empty'"
        }])
    );
}
