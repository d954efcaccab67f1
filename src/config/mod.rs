//! Configuration management for search-wrapped.
//!
//! Handles:
//! - Default ranking sizes for reports
//! - Input size limits
//! - Display options for text output

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WrappedError};
use crate::util::atomic_write;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Analysis defaults.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Display options.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from the default location, falling back to
    /// defaults when no file exists.
    pub fn load() -> Result<Self> {
        let config_path = default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WrappedError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| WrappedError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path, atomically.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| WrappedError::InvalidConfig {
            message: format!("Failed to serialize config: {e}"),
        })?;

        atomic_write(path, content.as_bytes())
    }

    /// Look up a configuration value by dotted key.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "analysis.top_searches" => Ok(self.analysis.top_searches.to_string()),
            "analysis.top_keywords" => Ok(self.analysis.top_keywords.to_string()),
            "analysis.top_prompts" => Ok(self.analysis.top_prompts.to_string()),
            "analysis.max_file_size" => Ok(self.analysis.max_file_size.to_string()),
            "display.color" => Ok(self.display.color.to_string()),
            "display.unicode" => Ok(self.display.unicode.to_string()),
            _ => Err(WrappedError::InvalidArgument {
                name: "key".to_string(),
                reason: format!("unknown configuration key: {key}"),
            }),
        }
    }

    /// Set a configuration value by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |reason: String| WrappedError::InvalidArgument {
            name: "value".to_string(),
            reason,
        };

        match key {
            "analysis.top_searches" => {
                self.analysis.top_searches =
                    value.parse().map_err(|_| invalid(format!("expected a number, got '{value}'")))?;
            }
            "analysis.top_keywords" => {
                self.analysis.top_keywords =
                    value.parse().map_err(|_| invalid(format!("expected a number, got '{value}'")))?;
            }
            "analysis.top_prompts" => {
                self.analysis.top_prompts =
                    value.parse().map_err(|_| invalid(format!("expected a number, got '{value}'")))?;
            }
            "analysis.max_file_size" => {
                self.analysis.max_file_size =
                    value.parse().map_err(|_| invalid(format!("expected a number, got '{value}'")))?;
            }
            "display.color" => {
                self.display.color =
                    value.parse().map_err(|_| invalid(format!("expected true/false, got '{value}'")))?;
            }
            "display.unicode" => {
                self.display.unicode =
                    value.parse().map_err(|_| invalid(format!("expected true/false, got '{value}'")))?;
            }
            _ => {
                return Err(WrappedError::InvalidArgument {
                    name: "key".to_string(),
                    reason: format!("unknown configuration key: {key}"),
                });
            }
        }
        Ok(())
    }
}

/// Analysis defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How many ranked queries the summary carries.
    #[serde(default = "default_top_searches")]
    pub top_searches: usize,
    /// How many ranked keywords the prompt report carries.
    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,
    /// How many ranked prompts the prompt report carries.
    #[serde(default = "default_top_prompts")]
    pub top_prompts: usize,
    /// Maximum input file size in bytes (0 = unlimited).
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_searches: default_top_searches(),
            top_keywords: default_top_keywords(),
            top_prompts: default_top_prompts(),
            max_file_size: default_max_file_size(),
        }
    }
}

/// Display configuration for text output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Use color output.
    #[serde(default = "default_true")]
    pub color: bool,
    /// Use Unicode characters for bars and sparklines.
    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            unicode: true,
        }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_top_searches() -> usize {
    crate::analytics::DEFAULT_TOP_N
}

fn default_top_keywords() -> usize {
    crate::prompts::DEFAULT_TOP_KEYWORDS
}

fn default_top_prompts() -> usize {
    crate::prompts::DEFAULT_TOP_PROMPTS
}

fn default_max_file_size() -> u64 {
    crate::parser::DEFAULT_MAX_FILE_SIZE
}

/// Get the default configuration path.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| WrappedError::Unsupported {
        feature: "config directory discovery".to_string(),
    })?;

    Ok(config_dir.join("search-wrapped").join("config.toml"))
}
