//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Get default config file path
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ogdl")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report malformed path indices as strings
    pub legacy_errors: bool,
    /// Include the document root when printing documents
    pub include_root: bool,
    /// Default output format
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            legacy_errors: false,
            include_root: false,
            format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is missing
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["legacy_errors", "include_root", "format"]
    }

    /// One-line help for a key
    pub fn describe(key: &str) -> Option<&'static str> {
        match key {
            "legacy_errors" => Some("return malformed-index messages as results (true/false)"),
            "include_root" => Some("print the document root in show/set/eval (true/false)"),
            "format" => Some("default output format (text/json)"),
            _ => None,
        }
    }

    /// Restore the default value of a key
    pub fn reset(&mut self, key: &str) -> anyhow::Result<()> {
        let default = Self::default();
        match default.get(key) {
            Some(value) => self.set(key, &value),
            None => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "legacy_errors" => Some(self.legacy_errors.to_string()),
            "include_root" => Some(self.include_root.to_string()),
            "format" => Some(self.format.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let parse_bool = |v: &str| {
            v.parse::<bool>().map_err(|_| {
                anyhow::anyhow!("Invalid value for {}: {} (expected true or false)", key, v)
            })
        };
        match key {
            "legacy_errors" => self.legacy_errors = parse_bool(value)?,
            "include_root" => self.include_root = parse_bool(value)?,
            "format" => match value {
                "text" | "json" => self.format = value.to_string(),
                _ => anyhow::bail!("Invalid format: {} (expected text or json)", value),
            },
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}
