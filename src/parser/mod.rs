// file: src/parser/mod.rs
// description: free-text question parsing module exports and entry points
// reference: internal module structure

pub mod multiple_choice;
pub mod notes;
pub mod patterns;
pub mod range;
pub mod strategy;
pub mod table;

pub use multiple_choice::ChoiceParser;
pub use notes::NoteParser;
pub use range::{detect_range, QuestionRange, RangeNotDetected, RANGE_SCAN_LINES};
pub use strategy::ParseStrategy;
pub use table::TableParser;

use crate::models::question::ParsedItem;
use tracing::debug;

/// Parse pasted part text into questions and info rows, in source order.
///
/// When no `Questions N-M` header is detected the documented fallback
/// range [`QuestionRange::FALLBACK`] applies; callers that must not guess
/// should use [`detect_range`] and [`parse_part_text_in_range`] instead.
pub fn parse_part_text(text: &str, part_number: u32, type_hint: Option<&str>) -> Vec<ParsedItem> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let range = detect_range(text).unwrap_or_else(|_| {
        debug!("no range header detected, using fallback {}", QuestionRange::FALLBACK);
        QuestionRange::FALLBACK
    });

    parse_part_text_in_range(text, part_number, type_hint, range)
}

/// Same as [`parse_part_text`] with an explicit question-number range.
pub fn parse_part_text_in_range(
    text: &str,
    part_number: u32,
    type_hint: Option<&str>,
    range: QuestionRange,
) -> Vec<ParsedItem> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let strategy = ParseStrategy::select(type_hint, text);
    debug!(?strategy, %range, "parsing part text");

    match strategy {
        ParseStrategy::Table => TableParser::new().parse(text, range, part_number),
        ParseStrategy::MultipleChoice => ChoiceParser::new().parse(text, range, part_number),
        ParseStrategy::NoteCompletion => NoteParser::new().parse(text, range, part_number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionKind;

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(parse_part_text("", 1, None).is_empty());
        assert!(parse_part_text("   \n  ", 1, None).is_empty());
    }

    #[test]
    fn test_detected_range_scopes_question_numbers() {
        let items = parse_part_text("Questions 5-8\n9. Some text\n6. A blank here", 1, None);
        assert!(items
            .iter()
            .filter_map(|item| item.as_question())
            .all(|q| q.number != 9));
        assert!(items
            .iter()
            .any(|item| item.as_question().is_some_and(|q| q.number == 6)));
    }

    #[test]
    fn test_fallback_range_without_header() {
        let items = parse_part_text("(2) first blank\n(50) out of fallback", 1, None);
        let numbers: Vec<u32> = items
            .iter()
            .filter_map(|item| item.as_question().map(|q| q.number))
            .collect();
        assert_eq!(numbers, vec![2]);
    }

    #[test]
    fn test_hint_selects_strategy_and_fixes_kind() {
        let text = "Questions 1-2\n1. Choose?\nA. yes\nB. no";
        let items = parse_part_text(text, 1, Some("mcq"));
        let question = items
            .iter()
            .find_map(|item| item.as_question())
            .expect("a question parses");
        assert_eq!(question.question_type, QuestionKind::MultipleChoice);
        assert_eq!(question.options, vec!["yes", "no"]);
    }

    #[test]
    fn test_tab_content_sniffs_as_table() {
        let text = "Questions 1-3\nStation\tTime\nCentral\t(1)";
        let items = parse_part_text(text, 1, None);
        let question = items
            .iter()
            .find_map(|item| item.as_question())
            .expect("a question parses");
        assert_eq!(question.question_type, QuestionKind::TableCompletion);
    }

    #[test]
    fn test_part_number_copied_through() {
        let items = parse_part_text("Questions 1-2\n(1) blank", 4, None);
        assert!(items.iter().all(|item| match item {
            ParsedItem::Question(q) => q.part_number == 4,
            ParsedItem::Info(info) => info.part_number == 4,
        }));
    }

    #[test]
    fn test_explicit_range_overrides_header() {
        let items = parse_part_text_in_range(
            "Questions 1-2\n(7) blank",
            1,
            Some("notes"),
            QuestionRange::new(7, 9).unwrap(),
        );
        assert!(items
            .iter()
            .any(|item| item.as_question().is_some_and(|q| q.number == 7)));
    }
}
