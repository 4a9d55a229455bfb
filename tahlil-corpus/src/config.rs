use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tahlil_text::{NormalizerConfig, StopWordError, StopWordSet};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "TAHLIL_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Analysis settings, loaded once at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Custom stop-word list, one word per line.
    pub stop_words_file: Option<PathBuf>,
    /// Merge the built-in Arabic list into the stop-word set.
    pub use_default_stop_words: bool,
    pub normalizer: NormalizerConfig,
    /// Default size of ranked views.
    pub top_k: usize,
    pub ascending: bool,
    /// External HTML to PDF converter used by export.
    pub pdf_converter: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stop_words_file: None,
            use_default_stop_words: true,
            normalizer: NormalizerConfig::default(),
            top_k: 10,
            ascending: false,
            pdf_converter: "wkhtmltopdf".to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(ConfigError::from)
    }

    pub fn to_path(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn from_env_or_default() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_path(path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Build the process-wide stop-word set described by this config.
    pub fn stop_words(&self) -> Result<StopWordSet, StopWordError> {
        let mut builder = StopWordSet::builder();
        if self.use_default_stop_words {
            builder = builder.with_defaults();
        }
        if let Some(path) = &self.stop_words_file {
            builder = builder.with_file(path)?;
        }
        Ok(builder.build())
    }
}
