// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ImportError, Result};
use crate::utils::text::{CLAUSE_CUT_MIN, MAX_FIELD_LENGTH};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub import: ImportConfig,
    pub sanitize: SanitizeConfig,
    #[serde(default)]
    pub aliases: AliasConfig,
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Copied through onto every normalized row.
    pub skill_type: String,
    pub output_dir: PathBuf,
    pub skip_patterns: Vec<String>,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SanitizeConfig {
    pub max_field_length: usize,
    pub clause_cut_min: usize,
}

/// Alias and synonym rules are data, not code: operators can teach the
/// importer new header spellings and format names without a release.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AliasConfig {
    #[serde(default)]
    pub headers: Vec<HeaderAliasRule>,
    #[serde(default)]
    pub formats: Vec<FormatSynonymRule>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeaderAliasRule {
    pub header: String,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormatSynonymRule {
    pub format: String,
    pub synonyms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParserConfig {
    /// Range applied by the CLI when no `Questions N-M` header is detected
    /// and `--strict` is not set.
    pub fallback_range_start: u32,
    pub fallback_range_end: u32,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("LISTENING_IMPORT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ImportError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ImportError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            import: ImportConfig {
                skill_type: "Listening for Details".to_string(),
                output_dir: PathBuf::from("./exports"),
                skip_patterns: vec!["~$".to_string(), "*.tmp".to_string()],
                max_file_size_mb: 10,
            },
            sanitize: SanitizeConfig {
                max_field_length: MAX_FIELD_LENGTH,
                clause_cut_min: CLAUSE_CUT_MIN,
            },
            aliases: AliasConfig::default(),
            parser: ParserConfig {
                fallback_range_start: 1,
                fallback_range_end: 40,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.import.skill_type.trim().is_empty() {
            return Err(ImportError::Config(
                "skill_type must not be empty".to_string(),
            ));
        }

        if self.sanitize.max_field_length == 0 {
            return Err(ImportError::Config(
                "max_field_length must be greater than 0".to_string(),
            ));
        }

        if self.sanitize.clause_cut_min >= self.sanitize.max_field_length {
            return Err(ImportError::Config(
                "clause_cut_min must be smaller than max_field_length".to_string(),
            ));
        }

        if self.parser.fallback_range_start < 1
            || self.parser.fallback_range_start > self.parser.fallback_range_end
        {
            return Err(ImportError::Config(
                "fallback range must satisfy 1 <= start <= end".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.import.skill_type, "Listening for Details");
        assert_eq!(config.sanitize.max_field_length, 300);
        assert_eq!(config.parser.fallback_range_end, 40);
    }

    #[test]
    fn test_invalid_limits_rejected() {
        let mut config = Config::default_config();
        config.sanitize.clause_cut_min = 300;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.parser.fallback_range_start = 0;
        assert!(config.validate().is_err());
    }
}
