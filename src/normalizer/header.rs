// file: src/normalizer/header.rs
// description: logical header resolution with a data-driven alias table
// reference: internal column mapping

use crate::utils::text::lookup_key;
use std::collections::HashMap;

/// The logical columns of a listening-exercise CSV export. All but
/// `AudioFile` are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    QuestionFormat,
    OriginalSentence,
    WordOrSentence,
    CorrectAnswer,
    IncorrectAnswer1,
    IncorrectAnswer2,
    IncorrectAnswer3,
    Explanation,
    AudioFile,
}

impl HeaderField {
    pub const ALL: [HeaderField; 9] = [
        HeaderField::QuestionFormat,
        HeaderField::OriginalSentence,
        HeaderField::WordOrSentence,
        HeaderField::CorrectAnswer,
        HeaderField::IncorrectAnswer1,
        HeaderField::IncorrectAnswer2,
        HeaderField::IncorrectAnswer3,
        HeaderField::Explanation,
        HeaderField::AudioFile,
    ];

    pub const REQUIRED: [HeaderField; 8] = [
        HeaderField::QuestionFormat,
        HeaderField::OriginalSentence,
        HeaderField::WordOrSentence,
        HeaderField::CorrectAnswer,
        HeaderField::IncorrectAnswer1,
        HeaderField::IncorrectAnswer2,
        HeaderField::IncorrectAnswer3,
        HeaderField::Explanation,
    ];

    /// The spelling used in error messages and raw field dumps.
    pub fn canonical(&self) -> &'static str {
        match self {
            HeaderField::QuestionFormat => "QuestionFormat",
            HeaderField::OriginalSentence => "original_sentence",
            HeaderField::WordOrSentence => "WordOrSentence",
            HeaderField::CorrectAnswer => "CorrectAnswer",
            HeaderField::IncorrectAnswer1 => "IncorrectAnswer1",
            HeaderField::IncorrectAnswer2 => "IncorrectAnswer2",
            HeaderField::IncorrectAnswer3 => "IncorrectAnswer3",
            HeaderField::Explanation => "Explanation",
            HeaderField::AudioFile => "AudioFile",
        }
    }

    /// Built-in aliases as lookup keys. New aliases are data: extend this
    /// table or supply extra rules through the configuration.
    fn builtin_aliases(&self) -> &'static [&'static str] {
        match self {
            HeaderField::QuestionFormat => &["format", "type", "qformat", "questiontype"],
            HeaderField::OriginalSentence => &["transcript", "original", "sentence", "sourcesentence"],
            HeaderField::WordOrSentence => &["content", "question", "text", "prompt", "wordsentence"],
            HeaderField::CorrectAnswer => &["answer", "correct", "rightanswer"],
            HeaderField::IncorrectAnswer1 => &["incorrect1", "wrong1", "wronganswer1", "distractor1"],
            HeaderField::IncorrectAnswer2 => &["incorrect2", "wrong2", "wronganswer2", "distractor2"],
            HeaderField::IncorrectAnswer3 => &["incorrect3", "wrong3", "wronganswer3", "distractor3"],
            HeaderField::Explanation => &["explain", "note", "notes", "feedback"],
            HeaderField::AudioFile => &["audio", "audiourl", "audiofilename", "audiopath", "mp3"],
        }
    }

    /// Lenient parse for configuration rule labels.
    pub fn from_label(label: &str) -> Option<Self> {
        let key = lookup_key(label);
        if key.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|field| lookup_key(field.canonical()) == key || field.builtin_aliases().contains(&key.as_str()))
    }
}

/// Resolved header row: logical field to column index.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    columns: HashMap<HeaderField, usize>,
}

impl HeaderMap {
    pub fn column(&self, field: HeaderField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    /// Raw cell for a logical field; short rows and unresolved optional
    /// columns read as empty.
    pub fn get<'a>(&self, record: &'a csv::StringRecord, field: HeaderField) -> &'a str {
        self.column(field)
            .and_then(|idx| record.get(idx))
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeaderResolver {
    extra: HashMap<String, HeaderField>,
}

impl HeaderResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aliases(
        mut self,
        field: HeaderField,
        aliases: impl IntoIterator<Item = String>,
    ) -> Self {
        for alias in aliases {
            let key = lookup_key(&alias);
            if !key.is_empty() {
                self.extra.insert(key, field);
            }
        }
        self
    }

    fn lookup(&self, cell: &str) -> Option<HeaderField> {
        let key = lookup_key(cell);
        if key.is_empty() {
            return None;
        }

        HeaderField::ALL
            .into_iter()
            .find(|field| {
                lookup_key(field.canonical()) == key
                    || field.builtin_aliases().contains(&key.as_str())
            })
            .or_else(|| self.extra.get(&key).copied())
    }

    /// Resolve every logical header against the header row. Fails fast with
    /// the complete list of missing required headers, never one at a time.
    pub fn resolve(&self, header_row: &[&str]) -> std::result::Result<HeaderMap, Vec<&'static str>> {
        let mut columns = HashMap::new();
        for (idx, cell) in header_row.iter().enumerate() {
            if let Some(field) = self.lookup(cell) {
                columns.entry(field).or_insert(idx);
            }
        }

        let missing: Vec<&'static str> = HeaderField::REQUIRED
            .into_iter()
            .filter(|field| !columns.contains_key(field))
            .map(|field| field.canonical())
            .collect();

        if missing.is_empty() {
            Ok(HeaderMap { columns })
        } else {
            Err(missing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_headers_resolve_in_any_order() {
        let resolver = HeaderResolver::new();
        let row = vec![
            "Explanation",
            "CorrectAnswer",
            "WordOrSentence",
            "original_sentence",
            "IncorrectAnswer3",
            "IncorrectAnswer2",
            "IncorrectAnswer1",
            "QuestionFormat",
        ];
        let map = resolver.resolve(&row).expect("all headers present");
        assert_eq!(map.column(HeaderField::QuestionFormat), Some(7));
        assert_eq!(map.column(HeaderField::Explanation), Some(0));
        assert_eq!(map.column(HeaderField::AudioFile), None);
    }

    #[test]
    fn test_aliases_and_case_insensitivity() {
        let resolver = HeaderResolver::new();
        let row = vec![
            "type",
            "Transcript",
            "TEXT",
            "answer",
            "wrong1",
            "distractor2",
            "Wrong_Answer3",
            "explain",
            "Audio File",
        ];
        let map = resolver.resolve(&row).expect("aliases should resolve");
        assert_eq!(map.column(HeaderField::QuestionFormat), Some(0));
        assert_eq!(map.column(HeaderField::OriginalSentence), Some(1));
        assert_eq!(map.column(HeaderField::WordOrSentence), Some(2));
        assert_eq!(map.column(HeaderField::IncorrectAnswer3), Some(6));
        assert_eq!(map.column(HeaderField::AudioFile), Some(8));
    }

    #[test]
    fn test_missing_headers_listed_all_at_once() {
        let resolver = HeaderResolver::new();
        let row = vec!["QuestionFormat", "WordOrSentence"];
        let missing = resolver.resolve(&row).expect_err("headers are missing");
        assert_eq!(missing.len(), 6);
        assert!(missing.contains(&"CorrectAnswer"));
        assert!(missing.contains(&"original_sentence"));
        assert!(missing.contains(&"Explanation"));
    }

    #[test]
    fn test_first_column_wins_on_duplicates() {
        let resolver = HeaderResolver::new();
        let row = vec![
            "QuestionFormat",
            "format",
            "original_sentence",
            "WordOrSentence",
            "CorrectAnswer",
            "IncorrectAnswer1",
            "IncorrectAnswer2",
            "IncorrectAnswer3",
            "Explanation",
        ];
        let map = resolver.resolve(&row).unwrap();
        assert_eq!(map.column(HeaderField::QuestionFormat), Some(0));
    }

    #[test]
    fn test_configured_aliases_extend_the_table() {
        let resolver = HeaderResolver::new()
            .with_aliases(HeaderField::AudioFile, vec!["Recording".to_string()]);
        assert_eq!(resolver.lookup("recording"), Some(HeaderField::AudioFile));
    }

    #[test]
    fn test_from_label() {
        assert_eq!(HeaderField::from_label("AudioFile"), Some(HeaderField::AudioFile));
        assert_eq!(HeaderField::from_label("transcript"), Some(HeaderField::OriginalSentence));
        assert_eq!(HeaderField::from_label("unknown"), None);
    }
}
