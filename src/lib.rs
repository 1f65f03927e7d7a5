// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod utils;

pub use config::{AliasConfig, Config, ImportConfig, ParserConfig, SanitizeConfig};
pub use error::{ImportError, Result};
pub use exporter::{ExportManifest, JsonExporter};
pub use models::{
    ImportSummary, InfoRow, NormalizedOutput, NormalizedRow, ParsedItem, ParsedQuestion,
    QuestionFormat, QuestionKind, RowError, RowWarning,
};
pub use normalizer::{normalize_listening_csv, CsvNormalizer, HeaderField};
pub use parser::{
    detect_range, parse_part_text, parse_part_text_in_range, ParseStrategy, QuestionRange,
    RangeNotDetected,
};
pub use pipeline::{BatchProcessor, BatchStats, ImportProgress};
pub use utils::{OperationTimer, PerformanceMetrics, Validator};
