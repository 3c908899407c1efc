//! Lag node configuration file format and operations.

use lagtime_core::{DEFAULT_LAG_TIME, DEFAULT_VALUE, Lag, LagError};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Configuration for a single lag node.
///
/// Configurations are stored as TOML and validated whenever they are loaded
/// or applied, so a bad file is rejected up front instead of reaching the
/// audio path.
///
/// # TOML Format
///
/// ```toml
/// name = "cutoff glide"
/// value = 0.0
/// lag_time = 0.05
/// ```
///
/// Every key is optional; missing keys take the lag filter defaults
/// (`value = 0.0`, `lag_time = 1.0`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LagConfig {
    /// Optional label, for presets and diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Initial target value.
    #[serde(default = "default_value")]
    pub value: f32,

    /// 60 dB lag time in seconds.
    #[serde(default = "default_lag_time")]
    pub lag_time: f32,
}

fn default_value() -> f32 {
    DEFAULT_VALUE
}

fn default_lag_time() -> f32 {
    DEFAULT_LAG_TIME
}

impl Default for LagConfig {
    fn default() -> Self {
        Self {
            name: None,
            value: DEFAULT_VALUE,
            lag_time: DEFAULT_LAG_TIME,
        }
    }
}

impl LagConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the initial target value.
    pub fn with_value(mut self, value: f32) -> Self {
        self.value = value;
        self
    }

    /// Set the lag time in seconds.
    pub fn with_lag_time(mut self, lag_time: f32) -> Self {
        self.lag_time = lag_time;
        self
    }

    /// Check the values against what the lag filter accepts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        LagError::check_value(self.value)?;
        LagError::check_lag_time(self.lag_time)?;
        Ok(())
    }

    /// Load and validate a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), "loaded lag config");
        Ok(config)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: LagConfig = toml::from_str(toml_str)?;
        if let Err(err) = config.validate() {
            tracing::warn!("rejected lag config: {err}");
            return Err(err);
        }
        Ok(config)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::info!(path = %path.display(), "saved lag config");
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build a lag filter with constant inputs from this configuration.
    pub fn build(&self) -> Result<Lag, ConfigError> {
        Ok(Lag::new(Some(self.value), Some(self.lag_time))?)
    }

    /// Rebind an existing lag filter's inputs to this configuration's constants.
    ///
    /// Both values are validated before either is applied, so a rejected
    /// configuration leaves the filter untouched. Output history is kept, so
    /// the filter glides from where it is to the new target.
    pub fn apply(&self, lag: &mut Lag) -> Result<(), ConfigError> {
        self.validate()?;
        lag.set_value(self.value)?;
        lag.set_lag_time(self.lag_time)?;
        Ok(())
    }
}
