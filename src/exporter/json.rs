// file: src/exporter/json.rs
// description: json export of normalization reports and parsed items

use crate::error::Result;
use crate::models::question::ParsedItem;
use crate::models::report::NormalizedOutput;
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

/// Written alongside every export so a re-import can verify which source
/// text produced which files.
#[derive(Debug, Clone, Serialize)]
pub struct ExportManifest {
    pub export_id: Uuid,
    pub exported_at: String,
    pub source_hash: String,
    pub items_exported: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export a CSV normalization report as `<name>.report.json`.
    pub fn export_report(
        &self,
        source_name: &str,
        source_text: &str,
        output: &NormalizedOutput,
        pretty: bool,
    ) -> Result<ExportManifest> {
        let file_name = format!("{}.report.json", source_name);
        self.write_json(&file_name, output, pretty)?;

        let manifest = self.finish_manifest(
            source_name,
            source_text,
            output.insert.len(),
            vec![file_name],
        )?;
        info!(
            "Exported report for {}: {} valid rows",
            source_name, manifest.items_exported
        );
        Ok(manifest)
    }

    /// Export parsed free-text items as `<name>.items.json`.
    pub fn export_items(
        &self,
        source_name: &str,
        source_text: &str,
        items: &[ParsedItem],
        pretty: bool,
    ) -> Result<ExportManifest> {
        let file_name = format!("{}.items.json", source_name);
        self.write_json(&file_name, &items, pretty)?;

        let manifest =
            self.finish_manifest(source_name, source_text, items.len(), vec![file_name])?;
        info!(
            "Exported {} parsed items for {}",
            manifest.items_exported, source_name
        );
        Ok(manifest)
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T, pretty: bool) -> Result<()> {
        let payload = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        fs::write(self.output_dir.join(file_name), payload)?;
        Ok(())
    }

    fn finish_manifest(
        &self,
        source_name: &str,
        source_text: &str,
        items_exported: usize,
        files: Vec<String>,
    ) -> Result<ExportManifest> {
        let manifest = ExportManifest {
            export_id: Uuid::new_v4(),
            exported_at: Utc::now().to_rfc3339(),
            source_hash: content_hash(source_text),
            items_exported,
            files,
        };
        self.write_json(&format!("{}.manifest.json", source_name), &manifest, true)?;
        Ok(manifest)
    }
}

/// SHA-256 hex digest of the source text.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::NormalizedOutput;
    use tempfile::tempdir;

    #[test]
    fn test_exporter_creates_output_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("exports/nested");
        let exporter = JsonExporter::new(&nested);
        assert!(exporter.is_ok());
        assert!(nested.is_dir());
    }

    #[test]
    fn test_report_export_round_trips() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let output = NormalizedOutput::failure("missing header row");

        let manifest = exporter
            .export_report("test01", "raw,csv", &output, true)
            .unwrap();
        assert_eq!(manifest.items_exported, 0);
        assert_eq!(manifest.files, vec!["test01.report.json"]);

        let written = std::fs::read_to_string(dir.path().join("test01.report.json")).unwrap();
        let parsed: NormalizedOutput = serde_json::from_str(&written).unwrap();
        assert!(!parsed.ok);
        assert!(dir.path().join("test01.manifest.json").is_file());
    }

    #[test]
    fn test_content_hash_is_stable() {
        assert_eq!(content_hash("abc"), content_hash("abc"));
        assert_ne!(content_hash("abc"), content_hash("abd"));
    }
}
