// file: src/utils/text.rs
// description: low-level text sanitization shared by both import pipelines
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^<>]+>").expect("HTML_TAG regex is valid");
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("WHITESPACE_RUN regex is valid");
}

/// Default ceiling for a sanitized single-line field, in characters.
pub const MAX_FIELD_LENGTH: usize = 300;

/// Truncation prefers a clause boundary only past this character position.
pub const CLAUSE_CUT_MIN: usize = 60;

/// Remove a leading byte-order mark if present.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Replace curly single and double quotes with their straight forms.
pub fn normalize_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            _ => c,
        })
        .collect()
}

pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

/// Collapse whitespace runs (including newlines) to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Truncate to `max_chars`, preferring a cut at the last `.`,`,`,`;`,`:`
/// found after `clause_min`. Operates on characters, not bytes.
pub fn truncate_at_clause(text: &str, max_chars: usize, clause_min: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return text.to_string();
    }

    let window = &chars[..max_chars];
    let clause_cut = window
        .iter()
        .rposition(|c| matches!(c, '.' | ',' | ';' | ':'))
        .filter(|&pos| pos > clause_min);

    match clause_cut {
        Some(pos) => window[..=pos].iter().collect::<String>().trim_end().to_string(),
        None => window.iter().collect(),
    }
}

/// Full single-line treatment: HTML strip, whitespace collapse, truncation.
pub fn clean_field(text: &str, max_chars: usize, clause_min: usize) -> String {
    truncate_at_clause(&collapse_whitespace(&strip_html(text)), max_chars, clause_min)
}

/// Multi-line treatment for transcript-style fields: HTML strip and trim
/// only. Internal newlines survive, trailing whitespace per line does not.
pub fn clean_multiline(text: &str) -> String {
    strip_html(text)
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Case- and punctuation-insensitive lookup key used by the header alias
/// and format synonym tables.
pub fn lookup_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Basename of a path-like cell value, accepting either separator.
pub fn file_basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path).trim()
}
