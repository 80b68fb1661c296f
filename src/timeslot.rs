// ⏰ Time Slot Parser - compact day + slot notation
// "M W 1 2" → [{M, [1,2], ["8-9","9-10"]}, {W, [1,2], ["8-9","9-10"]}]

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Day - the fixed vocabulary of day tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    M,
    T,
    W,
    Th,
    F,
    S,
}

impl Day {
    /// Recognise a day token (case-sensitive, whole token)
    pub fn from_token(token: &str) -> Option<Day> {
        match token {
            "M" => Some(Day::M),
            "T" => Some(Day::T),
            "W" => Some(Day::W),
            "Th" => Some(Day::Th),
            "F" => Some(Day::F),
            "S" => Some(Day::S),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Day::M => "M",
            Day::T => "T",
            Day::W => "W",
            Day::Th => "Th",
            Day::F => "F",
            Day::S => "S",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Slot index → clock range
pub const SLOT_TIMES: [(u32, &str); 9] = [
    (1, "8-9"),
    (2, "9-10"),
    (3, "10-11"),
    (4, "11-12"),
    (5, "12-1"),
    (6, "2-3"),
    (7, "3-4"),
    (8, "4-5"),
    (9, "5-6"),
];

/// Label used for slot indices outside `SLOT_TIMES`
pub const UNKNOWN_TIMING: &str = "Unknown";

/// Human-readable range for a slot index, "Unknown" when unmapped
pub fn slot_timing(slot: u32) -> &'static str {
    SLOT_TIMES
        .iter()
        .find(|(index, _)| *index == slot)
        .map(|(_, timing)| *timing)
        .unwrap_or(UNKNOWN_TIMING)
}

/// TimeSlot - one day with its slots and the parallel clock ranges
///
/// Value type: two slots are equal iff day, slots and timings all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: Day,
    pub slots: Vec<u32>,
    pub timings: Vec<String>,
}

impl TimeSlot {
    pub fn new(day: Day, slots: Vec<u32>) -> Self {
        let timings = slots.iter().map(|s| slot_timing(*s).to_string()).collect();
        TimeSlot { day, slots, timings }
    }
}

/// ParsedTiming - output of one parse call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTiming {
    /// Whitespace-normalized input text
    pub normalized: String,
    pub slots: Vec<TimeSlot>,
    /// Slot tokens with no digits, dropped from the result
    pub rejected: Vec<String>,
}

// ============================================================================
// PARSER
// ============================================================================

/// Reduce a slot token to its digits; `None` when nothing numeric remains
fn slot_index(token: &str) -> Option<u32> {
    let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    // Overlong digit runs can't be a real slot; map them past the table
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

/// Parse a timing cell into day/slot groups
///
/// Tokens are consumed as alternating runs: consecutive day tokens, then
/// consecutive non-day tokens. Every day in a run gets the full slot list of
/// the run that follows it. Slots seen before any day are dropped.
pub fn parse_time_slots(raw: &str) -> ParsedTiming {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let mut parsed = ParsedTiming {
        normalized: tokens.join(" "),
        ..ParsedTiming::default()
    };

    let mut idx = 0;
    while idx < tokens.len() {
        let mut days = Vec::new();
        while let Some(day) = tokens.get(idx).and_then(|t| Day::from_token(t)) {
            days.push(day);
            idx += 1;
        }

        let mut slots = Vec::new();
        while idx < tokens.len() && Day::from_token(tokens[idx]).is_none() {
            match slot_index(tokens[idx]) {
                Some(slot) => slots.push(slot),
                None => parsed.rejected.push(tokens[idx].to_string()),
            }
            idx += 1;
        }

        if days.is_empty() && !slots.is_empty() {
            log::debug!(
                "Dropping slots {:?} with no preceding day in '{}'",
                slots,
                parsed.normalized
            );
        }

        for day in days {
            parsed.slots.push(TimeSlot::new(day, slots.clone()));
        }
    }

    parsed
}

// ============================================================================
// TESTS
// ============================================================================
