//! Configuration provider with typed defaults
//!
//! Supplies timeout and feature-flag values by string key. The gateway's
//! real configuration service sits behind `ConfigProvider`; `MapConfig` is
//! the in-process implementation used by embedded deployments and tests.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Read access to string-keyed configuration with typed fallbacks
pub trait ConfigProvider: Send + Sync {
    /// Raw value for a key, if present
    fn get(&self, key: &str) -> Option<String>;

    /// String value with a default
    fn string_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Boolean value with a default; unparseable values fall back
    fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Millisecond duration value with a default; unparseable values fall back
    fn duration_ms_or(&self, key: &str, default: Duration) -> Duration {
        self.get(key)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(default)
    }
}

/// Errors loading configuration from a file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yml::Error),
}

/// Flat string map configuration
#[derive(Debug, Default, Clone)]
pub struct MapConfig {
    values: HashMap<String, String>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a YAML file containing a flat `key: value` mapping
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse from a YAML string; scalar values are stringified
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: HashMap<String, serde_yml::Value> = serde_yml::from_str(contents)?;
        let mut values = HashMap::new();
        for (key, value) in raw {
            let rendered = match value {
                serde_yml::Value::String(s) => s,
                serde_yml::Value::Bool(b) => b.to_string(),
                serde_yml::Value::Number(n) => n.to_string(),
                other => serde_yml::to_string(&other)?.trim_end().to_string(),
            };
            values.insert(key, rendered);
        }
        Ok(Self { values })
    }

    /// Set a single value, replacing any existing one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: MapConfig) {
        self.values.extend(other.values);
    }
}

impl ConfigProvider for MapConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
