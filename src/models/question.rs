// file: src/models/question.rs
// description: free-text parser output as a question/info-row tagged union
// reference: internal data structures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    TableCompletion,
    MultipleChoice,
    NoteCompletion,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::TableCompletion => "table_completion",
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::NoteCompletion => "note_completion",
        }
    }
}

/// One parsed unit in source order. Info rows carry contextual text (a
/// sub-heading, connecting prose) with no answerable question; keeping them
/// in the same sequence lets the renderer stitch context back next to the
/// question it precedes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedItem {
    Question(ParsedQuestion),
    Info(InfoRow),
}

impl ParsedItem {
    pub fn as_question(&self) -> Option<&ParsedQuestion> {
        match self {
            ParsedItem::Question(q) => Some(q),
            ParsedItem::Info(_) => None,
        }
    }

    pub fn as_info(&self) -> Option<&InfoRow> {
        match self {
            ParsedItem::Question(_) => None,
            ParsedItem::Info(info) => Some(info),
        }
    }

    pub fn is_info(&self) -> bool {
        matches!(self, ParsedItem::Info(_))
    }

    pub fn line_index(&self) -> usize {
        match self {
            ParsedItem::Question(q) => q.line_index,
            ParsedItem::Info(info) => info.line_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuestion {
    /// Always positive; numbers outside the detected range never reach here.
    pub number: u32,
    /// Extracted text with markers normalized to the canonical `(N)` form
    /// and any `[...]` answer removed.
    pub text: String,
    pub question_type: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    pub part_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_headers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub line_index: usize,
    pub original_line: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoRow {
    pub text: String,
    pub part_number: u32,
    pub line_index: usize,
    pub original_line: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let info = ParsedItem::Info(InfoRow {
            text: "Section A".to_string(),
            part_number: 1,
            line_index: 0,
            original_line: "Section A".to_string(),
        });

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["kind"], "info");
        assert_eq!(json["text"], "Section A");
    }

    #[test]
    fn test_question_kind_labels() {
        assert_eq!(QuestionKind::TableCompletion.as_str(), "table_completion");
        assert_eq!(QuestionKind::MultipleChoice.as_str(), "multiple_choice");
        assert_eq!(QuestionKind::NoteCompletion.as_str(), "note_completion");
    }

    #[test]
    fn test_accessors() {
        let question = ParsedItem::Question(ParsedQuestion {
            number: 3,
            text: "(3) text".to_string(),
            question_type: QuestionKind::NoteCompletion,
            options: Vec::new(),
            correct_answer: None,
            part_number: 2,
            label: None,
            section_label: None,
            table_headers: None,
            value: None,
            line_index: 4,
            original_line: "3) text".to_string(),
        });

        assert!(!question.is_info());
        assert_eq!(question.as_question().unwrap().number, 3);
        assert!(question.as_info().is_none());
        assert_eq!(question.line_index(), 4);
    }
}
