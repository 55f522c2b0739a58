use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::validate_and_normalize_url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Caption retrieval settings
    pub transcript: TranscriptConfig,

    /// Generative-text service settings
    pub summarizer: SummarizerConfig,

    /// Application settings
    pub app: AppConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Caption language to request; there is no fallback
    pub language: String,

    /// Keep HTML formatting tags in caption text
    pub preserve_formatting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Base URL of the Gemini REST API
    pub endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default output format
    pub default_output_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transcript: TranscriptConfig {
                language: "ja".to_string(),
                preserve_formatting: false,
            },
            summarizer: SummarizerConfig {
                endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            },
            app: AppConfig {
                default_output_format: "text".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        Self::load_from(&config_path).await
    }

    /// Load configuration from a file, creating it with defaults if missing
    pub async fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs_err::read_to_string(config_path)
                .context("Failed to read config file")?;

            let config: Config = serde_yaml::from_str(&content)
                .context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path).await?;
            tracing::debug!("Wrote default configuration to {}", config_path.display());
            Ok(config)
        }
    }

    /// Save configuration to a file
    pub async fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs_err::create_dir_all(parent)?;
            }
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("yt-digest").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.transcript.language.trim().is_empty() {
            anyhow::bail!("Transcript language must be configured");
        }

        validate_and_normalize_url(&self.summarizer.endpoint)
            .context("Invalid summarizer endpoint")?;

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Transcript Language: {}", self.transcript.language);
        println!("  Preserve Formatting: {}", self.transcript.preserve_formatting);
        println!("  Summarizer Endpoint: {}", self.summarizer.endpoint);
        println!("  Default Format: {}", self.app.default_output_format);
    }
}
