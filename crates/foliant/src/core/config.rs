//! Configuration loading and management.
//!
//! This module provides the configuration surface for the plugin pipeline and
//! utilities for loading it from TOML files, including discovery of a
//! `foliant.toml` in the project hierarchy.

use crate::{FoliantError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main extraction configuration.
///
/// Contains the configuration consumed by the plugin pipeline. It can be
/// loaded from a TOML file or created programmatically.
///
/// # Example
///
/// ```rust
/// use foliant::core::config::ExtractionConfig;
///
/// // Create with defaults
/// let config = ExtractionConfig::default();
///
/// // Load from TOML file
/// // let config = ExtractionConfig::from_toml_file("foliant.toml")?;
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// OCR configuration (None = OCR disabled)
    #[serde(default)]
    pub ocr: Option<OcrConfig>,

    /// Post-processor configuration (None = use defaults)
    #[serde(default)]
    pub postprocessor: Option<PostProcessorConfig>,
}

/// Post-processor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostProcessorConfig {
    /// Enable post-processors
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whitelist of processor names to run (None = all enabled)
    #[serde(default)]
    pub enabled_processors: Option<Vec<String>>,

    /// Blacklist of processor names to skip (None = none disabled)
    #[serde(default)]
    pub disabled_processors: Option<Vec<String>>,
}

/// OCR configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// OCR backend: tesseract, easyocr, paddleocr, or a custom name
    pub backend: String,

    /// Language code (e.g., "eng", "deu")
    #[serde(default = "default_eng")]
    pub language: String,

    /// Backend construction options passed to the backend factory.
    ///
    /// Keys and value types are backend-specific; the cache fingerprints
    /// this map to decide whether an already-constructed instance can be
    /// reused.
    #[serde(default)]
    pub backend_options: Option<serde_json::Map<String, serde_json::Value>>,
}

fn default_true() -> bool {
    true
}
fn default_eng() -> String {
    "eng".to_string()
}

impl Default for PostProcessorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            enabled_processors: None,
            disabled_processors: None,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: "tesseract".to_string(),
            language: default_eng(),
            backend_options: None,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file
    ///
    /// # Errors
    ///
    /// Returns `FoliantError::ValidationFailed` if the file doesn't exist or
    /// is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            FoliantError::validation_failed(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            FoliantError::validation_failed(format!("Invalid TOML in {}: {}", path.as_ref().display(), e))
        })
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `foliant.toml` in the current directory and parent
    /// directories.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(FoliantError::Io)?;

        loop {
            let foliant_toml = current.join("foliant.toml");
            if foliant_toml.exists() {
                return Ok(Some(Self::from_toml_file(foliant_toml)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}
