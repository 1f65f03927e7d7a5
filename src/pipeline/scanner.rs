// file: src/pipeline/scanner.rs
// description: directory walking and csv discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::ImportConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub struct CsvScanner {
    skip_patterns: Vec<String>,
    max_file_size_mb: usize,
}

/// A discovered CSV export. The file stem doubles as the skill test id,
/// matching how the admin tooling names per-test exports.
#[derive(Debug, Clone)]
pub struct ScannedCsv {
    pub path: PathBuf,
    pub relative_path: String,
    pub test_id: String,
    pub size: u64,
}

impl CsvScanner {
    pub fn new(config: &ImportConfig) -> Self {
        Self {
            skip_patterns: config.skip_patterns.clone(),
            max_file_size_mb: config.max_file_size_mb,
        }
    }

    pub fn scan_directory(&self, root: &Path) -> Result<Vec<ScannedCsv>> {
        info!("Scanning directory: {}", root.display());
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if self.should_skip(path) {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            if let Some(extension) = path.extension()
                && extension.eq_ignore_ascii_case("csv")
                && let Ok(metadata) = entry.metadata()
            {
                let size = metadata.len();
                let max_size = (self.max_file_size_mb * 1024 * 1024) as u64;

                if size > max_size {
                    debug!(
                        "Skipping large file ({} MB): {}",
                        size / 1024 / 1024,
                        path.display()
                    );
                    continue;
                }

                let relative_path = path
                    .strip_prefix(root)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .to_string();

                let test_id = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().to_string())
                    .unwrap_or_else(|| relative_path.clone());

                files.push(ScannedCsv {
                    path: path.to_path_buf(),
                    relative_path,
                    test_id,
                    size,
                });
            }
        }

        info!("Found {} csv files", files.len());
        Ok(files)
    }

    fn should_skip(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.skip_patterns {
            if pattern.contains('*') {
                let pattern_without_star = pattern.replace("*.", ".");
                if path_str.ends_with(&pattern_without_star) {
                    return true;
                }
            } else if path_str.contains(pattern) {
                return true;
            }
        }

        false
    }
}
