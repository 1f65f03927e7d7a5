// file: src/utils/validation.rs
// description: input preconditions for the commandline import layer
// reference: input validation patterns

use crate::error::{ImportError, Result};
use std::fs;
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            ImportError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(ImportError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ImportError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(ImportError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_csv_extension(path: &Path) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(()),
            _ => Err(ImportError::Validation(format!(
                "File is not a csv export: {}",
                path.display()
            ))),
        }
    }

    pub fn validate_content_not_empty(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(ImportError::Validation("Content is empty".to_string()));
        }
        Ok(())
    }

    /// Listening tests have four parts.
    pub fn validate_part_number(part: u32) -> Result<()> {
        if (1..=4).contains(&part) {
            Ok(())
        } else {
            Err(ImportError::Validation(format!(
                "Part number must be 1-4, got {}",
                part
            )))
        }
    }
}
