//! Configuration for converters and serializers
//!
//! Configuration can be written as TOML, YAML or JSON:
//!
//! ```toml
//! [[serializers.formats]]
//! format = "turtle"
//! weight = 1.0
//!
//! [[serializers.formats]]
//! format = "n3"
//! enabled = false
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::serialize::RdfFormat;

fn default_enabled() -> bool {
    true
}

/// Top-level configuration
///
/// # Example
///
/// ```
/// use represent_core::config::ConversionConfig;
///
/// let config = ConversionConfig::from_toml_str(r#"
///     [[serializers.formats]]
///     format = "turtle"
///     weight = 1.0
/// "#).unwrap();
/// assert_eq!(config.serializers.formats.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Built-in serializer registry settings
    #[serde(default)]
    pub serializers: SerializerConfig,
}

impl ConversionConfig {
    /// Parse TOML configuration
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML configuration
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON configuration
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| Error::ConfigError(format!("JSON parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, choosing the parser by extension
    /// (`.toml`, `.yaml`/`.yml` or `.json`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        tracing::debug!("Loading conversion config from {}", path.display());

        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            _ => Err(Error::ConfigError(format!(
                "Unrecognized config file extension: {}",
                path.display()
            ))),
        }
    }

    /// Check all sections
    pub fn validate(&self) -> Result<()> {
        self.serializers.validate()
    }
}

/// Settings for the built-in serializer registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SerializerConfig {
    /// Per-format overrides; listed formats take priority in ties, in order
    #[serde(default)]
    pub formats: Vec<FormatConfig>,
}

impl SerializerConfig {
    /// Reject duplicate formats and weights outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.formats {
            if !seen.insert(entry.format) {
                return Err(Error::ConfigError(format!(
                    "format {} configured more than once",
                    entry.format.content_type()
                )));
            }
            if let Some(weight) = entry.weight {
                if !(0.0..=1.0).contains(&weight) {
                    return Err(Error::ConfigError(format!(
                        "weight {} for {} is outside [0, 1]",
                        weight,
                        entry.format.content_type()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Override for a single serialization format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Which format
    pub format: RdfFormat,

    /// Priority; the format's default weight when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,

    /// Whether the format is offered at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}
