// file: src/parser/table.rs
// description: table-completion strategy over tab-separated part text
// reference: internal parsing rules

use crate::models::question::{InfoRow, ParsedItem, ParsedQuestion, QuestionKind};
use crate::parser::patterns::{extract_answers, normalize_cell_markers};
use crate::parser::range::QuestionRange;

/// Lines considered when locating the header row.
const HEADER_SCAN_LINES: usize = 10;

pub struct TableParser;

impl TableParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str, range: QuestionRange, part_number: u32) -> Vec<ParsedItem> {
        let lines: Vec<&str> = text.lines().collect();
        let header_idx = locate_header(&lines);
        let table_headers: Option<Vec<String>> = header_idx.map(|idx| {
            lines[idx]
                .split('\t')
                .map(|cell| cell.trim().to_string())
                .collect()
        });

        let mut items = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            if Some(idx) == header_idx || line.trim().is_empty() {
                continue;
            }

            let cells: Vec<&str> = line.split('\t').collect();
            let label = cells
                .first()
                .map(|cell| cell.trim())
                .filter(|cell| !cell.is_empty())
                .map(str::to_string);

            let mut emitted = false;
            for cell in &cells {
                let cell = cell.trim();
                if cell.is_empty() {
                    continue;
                }

                let (numbers, normalized) = normalize_cell_markers(cell, range);
                if numbers.is_empty() {
                    continue;
                }

                let (cell_text, answers) = extract_answers(&normalized);
                for (slot, number) in numbers.iter().enumerate() {
                    items.push(ParsedItem::Question(ParsedQuestion {
                        number: *number,
                        text: cell_text.clone(),
                        question_type: QuestionKind::TableCompletion,
                        options: Vec::new(),
                        correct_answer: answers.get(slot).filter(|a| !a.is_empty()).cloned(),
                        part_number,
                        label: label.clone(),
                        section_label: None,
                        table_headers: table_headers.clone(),
                        value: Some(cell.to_string()),
                        line_index: idx,
                        original_line: (*line).to_string(),
                    }));
                    emitted = true;
                }
            }

            if !emitted {
                let joined = cells
                    .iter()
                    .map(|cell| cell.trim())
                    .filter(|cell| !cell.is_empty())
                    .collect::<Vec<_>>()
                    .join("\t");
                if !joined.is_empty() {
                    items.push(ParsedItem::Info(InfoRow {
                        text: joined,
                        part_number,
                        line_index: idx,
                        original_line: (*line).to_string(),
                    }));
                }
            }
        }

        items
    }
}

impl Default for TableParser {
    fn default() -> Self {
        Self::new()
    }
}

/// The header is the line with the most tabs among the leading lines.
/// First line wins a tie; a table with no tabs at all has no header.
fn locate_header(lines: &[&str]) -> Option<usize> {
    let mut best_idx = None;
    let mut best_tabs = 0;
    for (idx, line) in lines.iter().take(HEADER_SCAN_LINES).enumerate() {
        let tabs = line.matches('\t').count();
        if tabs > best_tabs {
            best_tabs = tabs;
            best_idx = Some(idx);
        }
    }
    best_idx
}
