use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::{CacheError, Result};

/// Layered cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrataConfig {
    /// Expiration applied to every write, in seconds
    pub expiration_secs: u64,
    pub memory: MemoryLayerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryLayerConfig {
    pub name: String,
    pub max_entries: usize,
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            expiration_secs: 300,
            memory: MemoryLayerConfig::default(),
        }
    }
}

impl Default for MemoryLayerConfig {
    fn default() -> Self {
        Self {
            name: "memory".to_string(),
            max_entries: 10_000,
        }
    }
}

impl StrataConfig {
    /// Load configuration from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        Ok(config)
    }

    /// Parse and validate configuration from a YAML document
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let config: StrataConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.expiration_secs == 0 {
            return Err(CacheError::Config(
                "expiration_secs must be greater than 0".to_string(),
            ));
        }
        if self.memory.max_entries == 0 {
            return Err(CacheError::Config(
                "memory.max_entries must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn expiration(&self) -> Duration {
        Duration::from_secs(self.expiration_secs)
    }
}
