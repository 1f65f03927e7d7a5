// file: src/parser/patterns.rs
// description: compiled regex patterns and marker helpers for free-text parsing
// reference: https://docs.rs/regex

use crate::parser::range::QuestionRange;
use crate::utils::text::collapse_whitespace;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // Range headers: "Questions 5-8", "questions 5 – 8", "Questions 5 8"
    pub static ref RANGE_HEADER: Regex = Regex::new(
        r"(?i)\bquestions?\s+(\d{1,3})\s*[-\u{2013}\u{2014}\s]\s*(\d{1,3})\b"
    ).expect("RANGE_HEADER regex is valid");

    // Numeric markers
    pub static ref PAREN_MARKER: Regex = Regex::new(
        r"\((\d{1,3})\)"
    ).expect("PAREN_MARKER regex is valid");

    pub static ref LEADING_MARKER: Regex = Regex::new(
        r"^\s*(\d{1,3})\s*[.)]\s*"
    ).expect("LEADING_MARKER regex is valid");

    pub static ref BARE_PAREN_LINE: Regex = Regex::new(
        r"^\(\d{1,3}\)$"
    ).expect("BARE_PAREN_LINE regex is valid");

    pub static ref LINE_START_PAREN: Regex = Regex::new(
        r"^\s*\(\d{1,3}\)"
    ).expect("LINE_START_PAREN regex is valid");

    // Table cells accept parenthesized or bare numbers
    pub static ref CELL_MARKER: Regex = Regex::new(
        r"\((\d{1,3})\)|\b(\d{1,3})\b"
    ).expect("CELL_MARKER regex is valid");

    // Multiple-choice lines
    pub static ref CHOICE_QUESTION: Regex = Regex::new(
        r"^\s*(\d{1,3})[.)]\s+(\S.*)$"
    ).expect("CHOICE_QUESTION regex is valid");

    pub static ref CHOICE_OPTION: Regex = Regex::new(
        r"^\s*([A-G])[.)\s]\s*(\S.*)$"
    ).expect("CHOICE_OPTION regex is valid");

    // Inline answer markers: "[Paris]"
    pub static ref ANSWER_MARKER: Regex = Regex::new(
        r"\[([^\[\]]*)\]"
    ).expect("ANSWER_MARKER regex is valid");
}

/// True when the line opens with a numeric marker in either accepted form.
pub fn starts_with_marker(line: &str) -> bool {
    LEADING_MARKER.is_match(line) || LINE_START_PAREN.is_match(line)
}

/// Rewrite in-range markers in a table cell to the canonical `(N)` form,
/// collecting the matched numbers in order of appearance. Out-of-range
/// numbers are left untouched and not collected.
pub fn normalize_cell_markers(cell: &str, range: QuestionRange) -> (Vec<u32>, String) {
    let mut numbers = Vec::new();
    let normalized = CELL_MARKER.replace_all(cell, |caps: &Captures| {
        let digits = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or("");
        match digits.parse::<u32>() {
            Ok(n) if range.contains(n) => {
                numbers.push(n);
                format!("({})", n)
            }
            _ => caps[0].to_string(),
        }
    });
    (numbers, normalized.into_owned())
}

/// Note-completion marker pass: a leading `N.`/`N)` is converted to `(N)`
/// first, then all in-range `(N)` markers are collected. Markers outside
/// the range stay as written and yield no number.
pub fn normalize_line_markers(line: &str, range: QuestionRange) -> (Vec<u32>, String) {
    let mut working = line.to_string();
    if let Some(caps) = LEADING_MARKER.captures(&working)
        && let Ok(n) = caps[1].parse::<u32>()
        && range.contains(n)
    {
        let rest = working[caps.get(0).map(|m| m.end()).unwrap_or(0)..].to_string();
        working = format!("({}) {}", n, rest);
    }

    let mut numbers = Vec::new();
    let normalized = PAREN_MARKER.replace_all(&working, |caps: &Captures| {
        match caps[1].parse::<u32>() {
            Ok(n) if range.contains(n) => {
                numbers.push(n);
                format!("({})", n)
            }
            _ => caps[0].to_string(),
        }
    });
    (numbers, normalized.into_owned())
}

/// Strip `[...]` answer markers, returning the collapsed remaining text and
/// the extracted answers in order of appearance.
pub fn extract_answers(text: &str) -> (String, Vec<String>) {
    let mut answers = Vec::new();
    let cleaned = ANSWER_MARKER.replace_all(text, |caps: &Captures| {
        answers.push(caps[1].trim().to_string());
        String::new()
    });
    (collapse_whitespace(&cleaned), answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> QuestionRange {
        QuestionRange::new(start, end).unwrap()
    }

    #[test]
    fn test_range_header_variants() {
        for line in ["Questions 5-8", "questions 5 \u{2013} 8", "QUESTIONS 5 8", "Question 5-8"] {
            let caps = RANGE_HEADER.captures(line).unwrap_or_else(|| panic!("no match: {line}"));
            assert_eq!(&caps[1], "5");
            assert_eq!(&caps[2], "8");
        }
        assert!(RANGE_HEADER.captures("Question time").is_none());
    }

    #[test]
    fn test_normalize_cell_markers_mixed_forms() {
        let (numbers, text) = normalize_cell_markers("(1) and 2 arrive", range(1, 10));
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(text, "(1) and (2) arrive");
    }

    #[test]
    fn test_out_of_range_cell_numbers_untouched() {
        let (numbers, text) = normalize_cell_markers("platform 9 closes", range(1, 3));
        assert!(numbers.is_empty());
        assert_eq!(text, "platform 9 closes");
    }

    #[test]
    fn test_normalize_line_markers_leading_form() {
        let (numbers, text) = normalize_line_markers("1) The capital is [Paris]", range(1, 4));
        assert_eq!(numbers, vec![1]);
        assert!(text.starts_with("(1) "));
    }

    #[test]
    fn test_line_markers_ignore_mid_line_bare_numbers() {
        let (numbers, _) = normalize_line_markers("meet at 9 sharp", range(1, 40));
        assert!(numbers.is_empty());
    }

    #[test]
    fn test_extract_answers() {
        let (text, answers) = extract_answers("(1) The capital is [Paris] today");
        assert_eq!(text, "(1) The capital is today");
        assert_eq!(answers, vec!["Paris"]);
    }

    #[test]
    fn test_starts_with_marker() {
        assert!(starts_with_marker("3. next"));
        assert!(starts_with_marker("(3) next"));
        assert!(!starts_with_marker("next (3)"));
    }
}
