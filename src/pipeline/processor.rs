// file: src/pipeline/processor.rs
// description: batch normalization of a directory of csv exports
// reference: per-file normalize/export loop with progress reporting

use crate::config::Config;
use crate::error::{ImportError, Result};
use crate::exporter::JsonExporter;
use crate::models::report::NormalizedOutput;
use crate::normalizer::CsvNormalizer;
use crate::pipeline::progress::{BatchStats, ImportProgress};
use crate::pipeline::scanner::{CsvScanner, ScannedCsv};
use crate::utils::telemetry::OperationTimer;
use crate::utils::validation::Validator;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

pub struct BatchProcessor {
    config: Config,
}

impl BatchProcessor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Normalize every CSV file under `input_dir`, writing one report per
    /// file into the configured output directory. A file counts as failed
    /// when it produced no valid rows or could not be read.
    pub fn run(&self, input_dir: &Path, pretty: bool) -> Result<BatchStats> {
        Validator::validate_directory(input_dir)?;

        let scanner = CsvScanner::new(&self.config.import);
        let files = scanner.scan_directory(input_dir)?;
        if files.is_empty() {
            warn!("No csv files found under {}", input_dir.display());
            return Ok(BatchStats::new());
        }

        let exporter = JsonExporter::new(&self.config.import.output_dir)?;
        let normalizer = CsvNormalizer::from_config(&self.config);
        let progress = ImportProgress::new(files.len());
        let timer = OperationTimer::new("batch import");

        for file in &files {
            progress.set_message(file.relative_path.clone());

            match self.process_file(&normalizer, &exporter, file, pretty) {
                Ok(output) => {
                    progress.add_rows_valid(output.insert.len());
                    progress.add_rows_rejected(output.errors.len());
                    if output.ok {
                        progress.inc_files_processed();
                    } else {
                        warn!("{}: no valid rows", file.relative_path);
                        progress.inc_files_failed();
                    }
                }
                Err(err) => {
                    error!("{}: {}", file.relative_path, err);
                    progress.inc_files_failed();
                }
            }
        }

        progress.finish();
        let stats = progress.get_stats();
        timer.finish_with_count(stats.rows_valid);
        info!(
            "Batch import: {} files ok, {} failed, {} rows accepted",
            stats.files_processed, stats.files_failed, stats.rows_valid
        );
        Ok(stats)
    }

    fn process_file(
        &self,
        normalizer: &CsvNormalizer,
        exporter: &JsonExporter,
        file: &ScannedCsv,
        pretty: bool,
    ) -> Result<NormalizedOutput> {
        let text = fs::read_to_string(&file.path).map_err(|source| ImportError::FileOperation {
            path: file.path.clone(),
            source,
        })?;

        let output = normalizer.normalize(&text, &self.config.import.skill_type, &file.test_id);
        exporter.export_report(&file.test_id, &text, &output, pretty)?;
        Ok(output)
    }
}
