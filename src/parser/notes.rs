// file: src/parser/notes.rs
// description: note-completion strategy, the default free-text path
// reference: internal parsing rules

use crate::models::question::{InfoRow, ParsedItem, ParsedQuestion, QuestionKind};
use crate::parser::patterns::{
    extract_answers, normalize_line_markers, starts_with_marker, BARE_PAREN_LINE,
};
use crate::parser::range::QuestionRange;

pub struct NoteParser;

impl NoteParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str, range: QuestionRange, part_number: u32) -> Vec<ParsedItem> {
        let merged = merge_split_markers(text);
        let mut items = Vec::new();
        let mut section: Option<String> = None;

        for (idx, line) in &merged {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let (numbers, normalized) = normalize_line_markers(trimmed, range);
            if numbers.is_empty() {
                section = Some(trimmed.to_string());
                items.push(ParsedItem::Info(InfoRow {
                    text: trimmed.to_string(),
                    part_number,
                    line_index: *idx,
                    original_line: line.clone(),
                }));
                continue;
            }

            let (line_text, answers) = extract_answers(&normalized);
            for (slot, number) in numbers.iter().enumerate() {
                items.push(ParsedItem::Question(ParsedQuestion {
                    number: *number,
                    text: line_text.clone(),
                    question_type: QuestionKind::NoteCompletion,
                    options: Vec::new(),
                    correct_answer: answers.get(slot).filter(|a| !a.is_empty()).cloned(),
                    part_number,
                    label: None,
                    section_label: section.clone(),
                    table_headers: None,
                    value: None,
                    line_index: *idx,
                    original_line: line.clone(),
                }));
            }
        }

        items
    }
}

impl Default for NoteParser {
    fn default() -> Self {
        Self::new()
    }
}

/// PDF copies often split a `(N)` marker from its text onto separate lines.
/// Merge a marker-only line into the following line, keeping the marker
/// line's index, unless the next line opens with its own marker.
fn merge_split_markers(text: &str) -> Vec<(usize, String)> {
    let lines: Vec<&str> = text.lines().collect();
    let mut merged = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if BARE_PAREN_LINE.is_match(trimmed) && i + 1 < lines.len() {
            let next = lines[i + 1].trim();
            if !next.is_empty() && !starts_with_marker(next) {
                merged.push((i, format!("{} {}", trimmed, next)));
                i += 2;
                continue;
            }
        }

        merged.push((i, line.to_string()));
        i += 1;
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, start: u32, end: u32) -> Vec<ParsedItem> {
        NoteParser::new().parse(text, QuestionRange::new(start, end).unwrap(), 3)
    }

    #[test]
    fn test_leading_marker_normalized_with_answer() {
        let items = parse("1) The capital is [Paris]", 1, 4);
        assert_eq!(items.len(), 1);
        let question = items[0].as_question().unwrap();
        assert_eq!(question.number, 1);
        assert!(question.text.contains("(1)"));
        assert!(!question.text.contains("1)") || question.text.starts_with("(1)"));
        assert!(!question.text.contains('['));
        assert_eq!(question.correct_answer.as_deref(), Some("Paris"));
    }

    #[test]
    fn test_paren_marker_mid_line() {
        let items = parse("The ferry leaves from gate (12) daily", 10, 15);
        let question = items[0].as_question().unwrap();
        assert_eq!(question.number, 12);
        assert_eq!(question.text, "The ferry leaves from gate (12) daily");
    }

    #[test]
    fn test_out_of_range_line_degrades_to_info_row() {
        let items = parse("Questions 5-8\n9. Some text", 5, 8);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(ParsedItem::is_info));
        assert_eq!(items[1].as_info().unwrap().text, "9. Some text");
    }

    #[test]
    fn test_multiple_markers_on_one_line() {
        let items = parse("Bring a (1) [map] and a (2) [torch]", 1, 4);
        assert_eq!(items.len(), 2);
        let first = items[0].as_question().unwrap();
        let second = items[1].as_question().unwrap();
        assert_eq!(first.number, 1);
        assert_eq!(first.correct_answer.as_deref(), Some("map"));
        assert_eq!(second.number, 2);
        assert_eq!(second.correct_answer.as_deref(), Some("torch"));
        assert_eq!(first.text, "Bring a (1) and a (2)");
    }

    #[test]
    fn test_marker_only_line_merges_with_next() {
        let items = parse("(3)\nthe answer text", 1, 4);
        assert_eq!(items.len(), 1);
        let question = items[0].as_question().unwrap();
        assert_eq!(question.number, 3);
        assert_eq!(question.text, "(3) the answer text");
        assert_eq!(question.line_index, 0);
    }

    #[test]
    fn test_marker_only_line_not_merged_into_next_marker() {
        let items = parse("(3)\n4. next question", 1, 6);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_question().unwrap().number, 3);
        assert_eq!(items[1].as_question().unwrap().number, 4);
    }

    #[test]
    fn test_info_row_text_stays_verbatim() {
        let items = parse("Opening hours [draft]", 1, 4);
        let info = items[0].as_info().unwrap();
        assert_eq!(info.text, "Opening hours [draft]");
    }

    #[test]
    fn test_section_label_carries_onto_following_questions() {
        let items = parse("Accommodation\n(2) per night\nTransport\n(3) by bus", 1, 4);
        let questions: Vec<&ParsedQuestion> =
            items.iter().filter_map(ParsedItem::as_question).collect();
        assert_eq!(questions[0].section_label.as_deref(), Some("Accommodation"));
        assert_eq!(questions[1].section_label.as_deref(), Some("Transport"));
    }
}
