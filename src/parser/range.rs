// file: src/parser/range.rs
// description: question-number range detection from part headers
// reference: internal parsing rules

use crate::parser::patterns::RANGE_HEADER;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How many leading lines are scanned for a `Questions N-M` header.
pub const RANGE_SCAN_LINES: usize = 5;

/// Inclusive bounds on the question numbers a part may contain. Numbers
/// outside the range are never treated as question markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRange {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no `Questions N-M` header found in the leading lines")]
pub struct RangeNotDetected;

impl QuestionRange {
    /// Fallback used by `parse_part_text` when no header is detected.
    /// Callers that must not guess use [`detect_range`] instead.
    pub const FALLBACK: QuestionRange = QuestionRange { start: 1, end: 40 };

    pub fn new(start: u32, end: u32) -> Option<Self> {
        if start >= 1 && start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn contains(&self, number: u32) -> bool {
        number >= self.start && number <= self.end
    }
}

impl std::fmt::Display for QuestionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl std::str::FromStr for QuestionRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(['-', '\u{2013}'])
            .ok_or_else(|| format!("expected N-M, got {:?}", s))?;
        let start: u32 = start.trim().parse().map_err(|_| format!("bad start in {:?}", s))?;
        let end: u32 = end.trim().parse().map_err(|_| format!("bad end in {:?}", s))?;
        QuestionRange::new(start, end).ok_or_else(|| format!("invalid range {:?}", s))
    }
}

/// Scan the first [`RANGE_SCAN_LINES`] lines for a range header. Detection
/// is explicit: callers decide whether a miss is fatal or falls back to
/// [`QuestionRange::FALLBACK`].
pub fn detect_range(text: &str) -> std::result::Result<QuestionRange, RangeNotDetected> {
    for line in text.lines().take(RANGE_SCAN_LINES) {
        if let Some(caps) = RANGE_HEADER.captures(line) {
            let start = caps[1].parse::<u32>().unwrap_or(0);
            let end = caps[2].parse::<u32>().unwrap_or(0);
            if let Some(range) = QuestionRange::new(start, end) {
                return Ok(range);
            }
        }
    }
    Err(RangeNotDetected)
}
