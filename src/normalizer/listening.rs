// file: src/normalizer/listening.rs
// description: csv normalization for listening-exercise imports
// reference: https://docs.rs/csv

use crate::config::Config;
use crate::models::record::{FormatMatch, FormatResolver, NormalizedRow, QuestionFormat};
use crate::models::report::{NormalizedOutput, RowError, RowWarning};
use crate::normalizer::header::{HeaderField, HeaderMap, HeaderResolver};
use crate::utils::text::{
    clean_field, clean_multiline, normalize_quotes, strip_bom, CLAUSE_CUT_MIN, MAX_FIELD_LENGTH,
};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Normalizes raw CSV text into validated listening-question records.
///
/// Pure over its input: no I/O, and data-quality problems are reported in
/// the returned [`NormalizedOutput`] rather than thrown. Structural
/// problems (empty file, missing headers) abort the whole file; row-level
/// problems drop only the offending row.
#[derive(Debug, Clone)]
pub struct CsvNormalizer {
    headers: HeaderResolver,
    formats: FormatResolver,
    max_field_length: usize,
    clause_cut_min: usize,
}

impl Default for CsvNormalizer {
    fn default() -> Self {
        Self {
            headers: HeaderResolver::new(),
            formats: FormatResolver::new(),
            max_field_length: MAX_FIELD_LENGTH,
            clause_cut_min: CLAUSE_CUT_MIN,
        }
    }
}

impl CsvNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, max_field_length: usize, clause_cut_min: usize) -> Self {
        self.max_field_length = max_field_length;
        self.clause_cut_min = clause_cut_min;
        self
    }

    pub fn with_header_aliases(
        mut self,
        field: HeaderField,
        aliases: impl IntoIterator<Item = String>,
    ) -> Self {
        self.headers = self.headers.with_aliases(field, aliases);
        self
    }

    pub fn with_format_synonyms(
        mut self,
        format: QuestionFormat,
        synonyms: impl IntoIterator<Item = String>,
    ) -> Self {
        self.formats = self.formats.with_synonyms(format, synonyms);
        self
    }

    /// Build a normalizer carrying the configured limits plus any extra
    /// alias/synonym rules. Rules naming unknown headers or formats are
    /// skipped with a warning.
    pub fn from_config(config: &Config) -> Self {
        let mut normalizer = Self::new().with_limits(
            config.sanitize.max_field_length,
            config.sanitize.clause_cut_min,
        );

        for rule in &config.aliases.headers {
            match HeaderField::from_label(&rule.header) {
                Some(field) => {
                    normalizer =
                        normalizer.with_header_aliases(field, rule.aliases.iter().cloned());
                }
                None => warn!("ignoring alias rule for unknown header {:?}", rule.header),
            }
        }

        for rule in &config.aliases.formats {
            match QuestionFormat::from_label(&rule.format) {
                Some(format) => {
                    normalizer =
                        normalizer.with_format_synonyms(format, rule.synonyms.iter().cloned());
                }
                None => warn!("ignoring synonym rule for unknown format {:?}", rule.format),
            }
        }

        normalizer
    }

    pub fn normalize(
        &self,
        file_text: &str,
        skill_type: &str,
        skill_test_id: &str,
    ) -> NormalizedOutput {
        let text = normalize_quotes(strip_bom(file_text));
        if text.trim().is_empty() {
            return NormalizedOutput::failure("empty file: header row is missing");
        }

        let delimiter = sniff_delimiter(&text);
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let header_row = match reader.headers() {
            Ok(headers) => headers.clone(),
            Err(err) => {
                return NormalizedOutput::failure(format!("unreadable header row: {}", err));
            }
        };

        let header_cells: Vec<&str> = header_row.iter().collect();
        let map = match self.headers.resolve(&header_cells) {
            Ok(map) => map,
            Err(missing) => {
                return NormalizedOutput::failure(format!(
                    "missing required headers: {}",
                    missing.join(", ")
                ));
            }
        };

        let mut insert = Vec::new();
        let mut warnings = Vec::new();
        let mut errors = Vec::new();
        let mut rows_received = 0usize;

        for (idx, record) in reader.records().enumerate() {
            let row = idx + 1;
            rows_received += 1;

            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    errors.push(RowError {
                        row,
                        message: format!("unreadable row: {}", err),
                        fields: BTreeMap::new(),
                    });
                    continue;
                }
            };

            if let Some(normalized) = self.process_record(
                &record,
                &map,
                row,
                skill_type,
                skill_test_id,
                &mut warnings,
                &mut errors,
            ) {
                insert.push(normalized);
            }
        }

        debug!(
            rows_received,
            rows_valid = insert.len(),
            "csv normalization finished"
        );
        NormalizedOutput::assemble(insert, warnings, errors, rows_received)
    }

    #[allow(clippy::too_many_arguments)]
    fn process_record(
        &self,
        record: &StringRecord,
        map: &HeaderMap,
        row: usize,
        skill_type: &str,
        skill_test_id: &str,
        warnings: &mut Vec<RowWarning>,
        errors: &mut Vec<RowError>,
    ) -> Option<NormalizedRow> {
        let format_value = self.clean(map.get(record, HeaderField::QuestionFormat));
        let content = clean_multiline(map.get(record, HeaderField::WordOrSentence));
        let correct_answer = self.clean(map.get(record, HeaderField::CorrectAnswer));

        // Required-field check runs before format correction: a row with a
        // salvageable format but no answer is still rejected.
        let mut missing = Vec::new();
        if format_value.is_empty() {
            missing.push(HeaderField::QuestionFormat.canonical());
        }
        if content.is_empty() {
            missing.push(HeaderField::WordOrSentence.canonical());
        }
        if correct_answer.is_empty() {
            missing.push(HeaderField::CorrectAnswer.canonical());
        }
        if !missing.is_empty() {
            errors.push(RowError {
                row,
                message: format!("missing required fields: {}", missing.join(", ")),
                fields: raw_field_dump(record, map),
            });
            return None;
        }

        let question_format = match self.formats.resolve(&format_value) {
            Some(FormatMatch::Exact(format)) => format,
            Some(FormatMatch::Corrected(format)) => {
                warnings.push(RowWarning {
                    row,
                    field: HeaderField::QuestionFormat.canonical().to_string(),
                    message: format!(
                        "question format {:?} corrected to {}",
                        format_value,
                        format.as_str()
                    ),
                });
                format
            }
            None => {
                errors.push(RowError {
                    row,
                    message: format!("unrecognized question format {:?}", format_value),
                    fields: raw_field_dump(record, map),
                });
                return None;
            }
        };

        let incorrect_answers: Vec<String> = [
            HeaderField::IncorrectAnswer1,
            HeaderField::IncorrectAnswer2,
            HeaderField::IncorrectAnswer3,
        ]
        .into_iter()
        .map(|field| self.clean(map.get(record, field)))
        .filter(|value| !value.is_empty())
        .collect();

        let explanation = non_empty(self.clean(map.get(record, HeaderField::Explanation)));
        let original_sentence =
            non_empty(clean_multiline(map.get(record, HeaderField::OriginalSentence)));
        let audio_url =
            NormalizedRow::derive_audio_url(skill_test_id, map.get(record, HeaderField::AudioFile));

        Some(NormalizedRow {
            skill_type: skill_type.to_string(),
            skill_test_id: skill_test_id.to_string(),
            question_format,
            content,
            correct_answer,
            incorrect_answers,
            explanation,
            original_sentence,
            audio_url,
        })
    }

    fn clean(&self, raw: &str) -> String {
        clean_field(raw, self.max_field_length, self.clause_cut_min)
    }
}

/// `None` for an empty string, `Some(value)` otherwise.
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Comma unless the first non-empty line reads as semicolon-delimited.
/// Tab- and pipe-delimited files are not sniffed; they fail header
/// resolution with the full missing-header list.
fn sniff_delimiter(text: &str) -> u8 {
    let first = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    if first.contains(';') && !first.contains(',') {
        b';'
    } else {
        b','
    }
}

/// Untouched cell values keyed by canonical header name, for operator
/// diagnosis of rejected rows.
fn raw_field_dump(record: &StringRecord, map: &HeaderMap) -> BTreeMap<String, String> {
    HeaderField::ALL
        .into_iter()
        .filter(|field| map.column(*field).is_some())
        .map(|field| {
            (
                field.canonical().to_string(),
                map.get(record, field).to_string(),
            )
        })
        .collect()
}

/// Normalize raw CSV text for one listening test. See [`CsvNormalizer`].
pub fn normalize_listening_csv(
    file_text: &str,
    skill_type: &str,
    skill_test_id: &str,
) -> NormalizedOutput {
    CsvNormalizer::new().normalize(file_text, skill_type, skill_test_id)
}
