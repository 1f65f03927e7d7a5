// file: src/parser/strategy.rs
// description: parse strategy selection from caller hints and content sniffing
// reference: internal classification rules

use crate::models::question::QuestionKind;
use crate::utils::text::lookup_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    Table,
    MultipleChoice,
    NoteCompletion,
}

impl ParseStrategy {
    /// An explicit caller hint always wins over sniffing.
    pub fn from_hint(hint: &str) -> Option<Self> {
        match lookup_key(hint).as_str() {
            "table" | "tablecompletion" => Some(ParseStrategy::Table),
            "mcq" | "choice" | "multiplechoice" => Some(ParseStrategy::MultipleChoice),
            "note" | "notes" | "notecompletion" => Some(ParseStrategy::NoteCompletion),
            _ => None,
        }
    }

    /// Content sniffing. Note completion is the fallback path: anything
    /// that is neither tabular nor multiple choice parses as notes.
    pub fn detect(text: &str) -> Self {
        let lower = text.to_lowercase();
        if text.contains('\t') || lower.contains("table") {
            ParseStrategy::Table
        } else if lower.contains("multiple choice") || lower.contains("choose the correct letter") {
            ParseStrategy::MultipleChoice
        } else {
            ParseStrategy::NoteCompletion
        }
    }

    pub fn select(hint: Option<&str>, text: &str) -> Self {
        hint.and_then(Self::from_hint)
            .unwrap_or_else(|| Self::detect(text))
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            ParseStrategy::Table => QuestionKind::TableCompletion,
            ParseStrategy::MultipleChoice => QuestionKind::MultipleChoice,
            ParseStrategy::NoteCompletion => QuestionKind::NoteCompletion,
        }
    }
}
