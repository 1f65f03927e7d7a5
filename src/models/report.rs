// file: src/models/report.rs
// description: whole-file normalization result with row-level diagnostics
// reference: internal data structures

use crate::models::record::NormalizedRow;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Non-fatal row note, e.g. a fuzzy-corrected question format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowWarning {
    /// 1-based data row number (the header is not counted).
    pub row: usize,
    pub field: String,
    pub message: String,
}

/// Fatal row note. The row is dropped; `fields` carries the raw values so
/// an operator can fix the source CSV. Row 0 marks a whole-file failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl RowError {
    pub fn file_level(message: impl Into<String>) -> Self {
        Self {
            row: 0,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub rows_received: usize,
    pub rows_valid: usize,
    /// Distinct row numbers with at least one warning.
    pub rows_with_warnings: usize,
    /// Raw error-entry count. Deliberately NOT deduplicated by row; the
    /// asymmetry with `rows_with_warnings` is pinned by tests.
    pub rows_with_errors: usize,
}

/// Result of normalizing one CSV file. `ok` is true iff at least one row
/// survived into `insert`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedOutput {
    pub ok: bool,
    pub insert: Vec<NormalizedRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RowWarning>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RowError>,
    pub summary: ImportSummary,
}

impl NormalizedOutput {
    /// Whole-file failure: nothing was processed.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            insert: Vec::new(),
            warnings: Vec::new(),
            errors: vec![RowError::file_level(message)],
            summary: ImportSummary {
                rows_with_errors: 1,
                ..ImportSummary::default()
            },
        }
    }

    /// Assemble the final result, deriving the summary counts.
    pub fn assemble(
        insert: Vec<NormalizedRow>,
        warnings: Vec<RowWarning>,
        errors: Vec<RowError>,
        rows_received: usize,
    ) -> Self {
        let warned_rows: BTreeSet<usize> = warnings.iter().map(|w| w.row).collect();
        let summary = ImportSummary {
            rows_received,
            rows_valid: insert.len(),
            rows_with_warnings: warned_rows.len(),
            rows_with_errors: errors.len(),
        };

        Self {
            ok: !insert.is_empty(),
            insert,
            warnings,
            errors,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::QuestionFormat;

    fn sample_row() -> NormalizedRow {
        NormalizedRow {
            skill_type: "Listening for Details".to_string(),
            skill_test_id: "t1".to_string(),
            question_format: QuestionFormat::Dictation,
            content: "Type what you hear".to_string(),
            correct_answer: "apple".to_string(),
            incorrect_answers: Vec::new(),
            explanation: None,
            original_sentence: None,
            audio_url: None,
        }
    }

    #[test]
    fn test_failure_has_single_file_level_error() {
        let output = NormalizedOutput::failure("missing header row");
        assert!(!output.ok);
        assert!(output.insert.is_empty());
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].row, 0);
        assert_eq!(output.summary.rows_with_errors, 1);
    }

    #[test]
    fn test_ok_requires_at_least_one_insert() {
        let empty = NormalizedOutput::assemble(vec![], vec![], vec![], 2);
        assert!(!empty.ok);

        let one = NormalizedOutput::assemble(vec![sample_row()], vec![], vec![], 2);
        assert!(one.ok);
        assert_eq!(one.summary.rows_valid, 1);
    }

    #[test]
    fn summary_counts_distinct_warning_rows_but_raw_errors() {
        let warn = |row| RowWarning {
            row,
            field: "QuestionFormat".to_string(),
            message: "corrected".to_string(),
        };
        let err = |row| RowError {
            row,
            message: "bad".to_string(),
            fields: BTreeMap::new(),
        };

        let output = NormalizedOutput::assemble(
            vec![sample_row()],
            vec![warn(1), warn(1), warn(2)],
            vec![err(3), err(3)],
            4,
        );

        assert_eq!(output.summary.rows_with_warnings, 2);
        assert_eq!(output.summary.rows_with_errors, 2);
    }
}
