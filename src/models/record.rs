// file: src/models/record.rs
// description: validated listening-question record and format resolution
// reference: internal data structures

use crate::utils::text::{file_basename, lookup_key};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionFormat {
    #[serde(rename = "Listening_Dictation")]
    Dictation,
    #[serde(rename = "Listening_MultipleChoice")]
    MultipleChoice,
}

impl QuestionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionFormat::Dictation => "Listening_Dictation",
            QuestionFormat::MultipleChoice => "Listening_MultipleChoice",
        }
    }

    /// Canonical spellings accepted without correction.
    pub fn from_exact(value: &str) -> Option<Self> {
        match value {
            "Listening_Dictation" => Some(QuestionFormat::Dictation),
            "Listening_MultipleChoice" => Some(QuestionFormat::MultipleChoice),
            _ => None,
        }
    }

    /// Lenient parse for configuration rule labels.
    pub fn from_label(label: &str) -> Option<Self> {
        if let Some(format) = Self::from_exact(label) {
            return Some(format);
        }
        builtin_synonym(&lookup_key(label))
    }
}

/// Built-in synonym table for fuzzy format correction. Keys are lookup
/// keys: lowercase with punctuation stripped.
const FORMAT_SYNONYMS: &[(&str, QuestionFormat)] = &[
    ("dictation", QuestionFormat::Dictation),
    ("listeningdictation", QuestionFormat::Dictation),
    ("shortanswer", QuestionFormat::Dictation),
    ("listeningshortanswer", QuestionFormat::Dictation),
    ("gapfill", QuestionFormat::Dictation),
    ("multiplechoice", QuestionFormat::MultipleChoice),
    ("listeningmultiplechoice", QuestionFormat::MultipleChoice),
    ("mcq", QuestionFormat::MultipleChoice),
    ("multichoice", QuestionFormat::MultipleChoice),
    ("choice", QuestionFormat::MultipleChoice),
    ("comprehension", QuestionFormat::MultipleChoice),
    ("listeningcomprehension", QuestionFormat::MultipleChoice),
];

fn builtin_synonym(key: &str) -> Option<QuestionFormat> {
    FORMAT_SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == key)
        .map(|(_, format)| *format)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMatch {
    /// Canonical spelling, accepted silently.
    Exact(QuestionFormat),
    /// Resolved through the synonym table; the caller records a warning.
    Corrected(QuestionFormat),
}

#[derive(Debug, Clone, Default)]
pub struct FormatResolver {
    extra: Vec<(String, QuestionFormat)>,
}

impl FormatResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_synonyms(
        mut self,
        format: QuestionFormat,
        synonyms: impl IntoIterator<Item = String>,
    ) -> Self {
        for synonym in synonyms {
            self.extra.push((lookup_key(&synonym), format));
        }
        self
    }

    pub fn resolve(&self, raw: &str) -> Option<FormatMatch> {
        if let Some(format) = QuestionFormat::from_exact(raw) {
            return Some(FormatMatch::Exact(format));
        }

        let key = lookup_key(raw);
        if key.is_empty() {
            return None;
        }

        builtin_synonym(&key)
            .or_else(|| {
                self.extra
                    .iter()
                    .find(|(synonym, _)| *synonym == key)
                    .map(|(_, format)| *format)
            })
            .map(FormatMatch::Corrected)
    }
}

/// One validated listening-question candidate, ready for persistence by the
/// import UI. Field names map 1:1 onto the question-records schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub skill_type: String,
    pub skill_test_id: String,
    pub question_format: QuestionFormat,
    pub content: String,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incorrect_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl NormalizedRow {
    /// Re-key a bare audio filename under the owning test. Any path prefix
    /// in the cell is discarded.
    pub fn derive_audio_url(skill_test_id: &str, cell: &str) -> Option<String> {
        let name = file_basename(cell.trim());
        if name.is_empty() {
            None
        } else {
            Some(format!("{}/{}", skill_test_id, name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_formats_resolve_silently() {
        let resolver = FormatResolver::new();
        assert_eq!(
            resolver.resolve("Listening_Dictation"),
            Some(FormatMatch::Exact(QuestionFormat::Dictation))
        );
        assert_eq!(
            resolver.resolve("Listening_MultipleChoice"),
            Some(FormatMatch::Exact(QuestionFormat::MultipleChoice))
        );
    }

    #[test]
    fn test_fuzzy_formats_resolve_as_corrections() {
        let resolver = FormatResolver::new();
        for raw in ["Listening dictation", "DICTATION", "listening_shortanswer"] {
            assert_eq!(
                resolver.resolve(raw),
                Some(FormatMatch::Corrected(QuestionFormat::Dictation)),
                "expected {raw:?} to correct to dictation"
            );
        }
        assert_eq!(
            resolver.resolve("comprehension"),
            Some(FormatMatch::Corrected(QuestionFormat::MultipleChoice))
        );
    }

    #[test]
    fn test_unknown_format_rejected() {
        let resolver = FormatResolver::new();
        assert_eq!(resolver.resolve("banana"), None);
        assert_eq!(resolver.resolve(""), None);
    }

    #[test]
    fn test_configured_synonyms_extend_the_table() {
        let resolver = FormatResolver::new()
            .with_synonyms(QuestionFormat::Dictation, vec!["Nghe chép".to_string()]);
        assert_eq!(
            resolver.resolve("nghe chep"),
            None,
            "diacritics are not folded, only case and punctuation"
        );
        assert_eq!(
            resolver.resolve("NGHE CHÉP"),
            Some(FormatMatch::Corrected(QuestionFormat::Dictation))
        );
    }

    #[test]
    fn test_audio_url_derivation() {
        assert_eq!(
            NormalizedRow::derive_audio_url("abc123", "/some/path/intro.mp3"),
            Some("abc123/intro.mp3".to_string())
        );
        assert_eq!(NormalizedRow::derive_audio_url("abc123", "  "), None);
    }
}
