//! Engine configuration: how template indices map onto types and sections.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Fixed at startup; nothing reloads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of document types in play (one primary section each).
    pub num_types: u32,
    /// Templates per type (one secondary section each).
    pub templates_per_type: u32,
    /// Expected field count of every catalog type.
    pub fields_per_type: usize,
    /// Validity of a cached identity assignment, in seconds.
    pub cache_duration_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_types: 5,
            templates_per_type: 3,
            fields_per_type: 12,
            cache_duration_secs: 600,
        }
    }
}

impl EngineConfig {
    pub fn load_from_ron(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = ron::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_types == 0 {
            return Err(ConfigError::Invalid("num_types must be positive".to_string()));
        }
        if self.templates_per_type == 0 {
            return Err(ConfigError::Invalid(
                "templates_per_type must be positive".to_string(),
            ));
        }
        if self.num_types.checked_mul(self.templates_per_type).is_none() {
            return Err(ConfigError::Invalid(format!(
                "{} types of {} templates overflow the template index",
                self.num_types, self.templates_per_type
            )));
        }
        Ok(())
    }

    /// Highest valid template index. Saturates for configurations that
    /// `validate` rejects.
    pub fn total_templates(&self) -> u32 {
        self.num_types.saturating_mul(self.templates_per_type)
    }

    pub fn cache_duration(&self) -> Duration {
        Duration::from_secs(self.cache_duration_secs)
    }

    /// Zero-based type index of a 1-based template index.
    pub fn type_index(&self, template: u32) -> usize {
        (template.saturating_sub(1) / self.templates_per_type) as usize
    }

    /// Zero-based position of a template within its type.
    pub fn position(&self, template: u32) -> usize {
        (template.saturating_sub(1) % self.templates_per_type) as usize
    }
}
