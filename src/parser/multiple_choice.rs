// file: src/parser/multiple_choice.rs
// description: multiple-choice strategy with question/option accumulation
// reference: internal parsing rules

use crate::models::question::{InfoRow, ParsedItem, ParsedQuestion, QuestionKind};
use crate::parser::patterns::{extract_answers, CHOICE_OPTION, CHOICE_QUESTION};
use crate::parser::range::QuestionRange;

pub struct ChoiceParser;

impl ChoiceParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str, range: QuestionRange, part_number: u32) -> Vec<ParsedItem> {
        let mut items: Vec<ParsedItem> = Vec::new();
        let mut open: Option<usize> = None;

        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(caps) = CHOICE_QUESTION.captures(trimmed) {
                let number = caps[1].parse::<u32>().unwrap_or(0);
                if range.contains(number) {
                    let (stem, answers) = extract_answers(&caps[2]);
                    items.push(ParsedItem::Question(ParsedQuestion {
                        number,
                        text: stem,
                        question_type: QuestionKind::MultipleChoice,
                        options: Vec::new(),
                        correct_answer: answers.into_iter().find(|a| !a.is_empty()),
                        part_number,
                        label: None,
                        section_label: None,
                        table_headers: None,
                        value: None,
                        line_index: idx,
                        original_line: line.to_string(),
                    }));
                    open = Some(items.len() - 1);
                    continue;
                }
                // An out-of-range number is not a question marker; the line
                // is preserved as context below, without closing the open
                // question.
            } else if let Some(caps) = CHOICE_OPTION.captures(trimmed)
                && let Some(open_idx) = open
                && let ParsedItem::Question(question) = &mut items[open_idx]
            {
                question.options.push(caps[2].trim().to_string());
                continue;
            }

            items.push(ParsedItem::Info(InfoRow {
                text: trimmed.to_string(),
                part_number,
                line_index: idx,
                original_line: line.to_string(),
            }));
        }

        items
    }
}

impl Default for ChoiceParser {
    fn default() -> Self {
        Self::new()
    }
}
