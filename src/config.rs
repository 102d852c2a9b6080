//! # Profile Configuration
//!
//! A move and the generator limits can be described in a TOML file:
//!
//! ```toml
//! [motion]
//! start = [0.0, 0.0, 0.0]
//! end = [0.0, 0.0, 10.0]
//! max_velocity = 5.0
//! acceleration = 2.0
//! deceleration = 2.0
//! sampling_interval = 0.1
//!
//! [generator]
//! max_samples = 1000000
//!
//! [output]
//! format = "csv"
//! ```
//!
//! Every section and field is optional and falls back to its default.

// src/config.rs - Single configuration file
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::motion::{MotionParameters, ValidationError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid motion parameters: {0}")]
    Invalid(#[from] ValidationError),
    #[error("generator.max_samples must be > 0")]
    ZeroSampleLimit,
}

/// Top-level configuration: the move, generator limits and output options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub motion: MotionParameters,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Resource limits for profile generation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Largest profile (in points) the generator will materialize.
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_samples: default_max_samples(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.motion.validate()?;
        if self.generator.max_samples == 0 {
            return Err(ConfigError::ZeroSampleLimit);
        }
        Ok(())
    }
}

fn default_max_samples() -> usize { 1_000_000 }

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                Err(ConfigError::Toml(e))
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path, e);
            Err(ConfigError::Io(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Vec3;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.motion.start, Vec3::ZERO);
        assert_eq!(config.motion.end, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(config.motion.max_velocity, 5.0);
        assert_eq!(config.motion.acceleration, 2.0);
        assert_eq!(config.motion.deceleration, 2.0);
        assert_eq!(config.motion.sampling_interval, 0.1);
        assert_eq!(config.generator.max_samples, 1_000_000);
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_success() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("move.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "[motion]\nend = [3.0, 4.0, 0.0]\nmax_velocity = 8.0\n\n[output]\nformat = 'json'").unwrap();
        file.flush().unwrap();
        let config = load_config(file_path.to_str().unwrap()).unwrap();
        assert_eq!(config.motion.end, Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(config.motion.max_velocity, 8.0);
        assert_eq!(config.output.format, OutputFormat::Json);
        // Defaults for missing fields
        assert_eq!(config.motion.acceleration, 2.0);
        assert_eq!(config.generator.max_samples, 1_000_000);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent_file.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "not a valid toml").unwrap();
        file.flush().unwrap();
        let result = load_config(file_path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_validate_rejects_bad_motion() {
        let toml = r#"
        [motion]
        deceleration = -1.0
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(ValidationError::InvalidDeceleration(_)))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_sample_limit() {
        let config: Config = toml::from_str("[generator]\nmax_samples = 0").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::ZeroSampleLimit)));
    }
}
