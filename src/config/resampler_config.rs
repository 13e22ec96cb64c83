use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::analysis::DEFAULT_K_NEIGHBORS;
use crate::core::error::{ResampleError, ResampleResult};

/// Settings shared by every resampling operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResamplerConfig {
    /// Seed for every random draw, so reruns give the same rows
    pub seed: u64,
    /// Neighbors considered by synthetic upsampling
    pub k_neighbors: usize,
    /// Ratio used when an operation is called without one
    pub default_ratio: f64,
    /// Whether random sampling draws with replacement by default
    pub replace: bool,
}

impl Default for ResamplerConfig {
    fn default() -> Self {
        Self {
            seed: 23,
            k_neighbors: DEFAULT_K_NEIGHBORS,
            default_ratio: 1.0,
            replace: false,
        }
    }
}

impl ResamplerConfig {
    /// Default location of the config file in the platform config directory
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "class-resampler").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load the config from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(config_path) = Self::get_config_path() else {
            warn!("Could not determine config directory. Using defaults.");
            return Self::default();
        };

        if !config_path.exists() {
            info!("No config file found. Using defaults.");
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => {
                info!("Loaded resampler config from: {:?}", config_path);
                config
            }
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> ResampleResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ResampleError::Config(format!("failed to read {:?}: {}", path, e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ResampleError::Config(format!("failed to parse {:?}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> ResampleResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ResampleError::Config(format!("failed to create {:?}: {}", parent, e))
            })?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ResampleError::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| ResampleError::Config(format!("failed to write {:?}: {}", path, e)))?;

        info!("Resampler config saved to: {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> ResampleResult<()> {
        if self.k_neighbors == 0 {
            return Err(ResampleError::Config(
                "k_neighbors must be at least 1".to_string(),
            ));
        }
        if !self.default_ratio.is_finite() || self.default_ratio <= 0.0 {
            return Err(ResampleError::InvalidRatio(self.default_ratio));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ResamplerConfig::default();
        assert_eq!(config.seed, 23);
        assert_eq!(config.k_neighbors, 5);
        assert_eq!(config.default_ratio, 1.0);
        assert!(!config.replace);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = ResamplerConfig {
            seed: 42,
            k_neighbors: 3,
            default_ratio: 0.5,
            replace: true,
        };

        config.save_to(&path).unwrap();
        assert_eq!(ResamplerConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: ResamplerConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.k_neighbors, 5);
    }

    #[test]
    fn test_load_from_rejects_zero_neighbors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"k_neighbors": 0}"#).unwrap();

        assert!(matches!(
            ResamplerConfig::load_from(&path),
            Err(ResampleError::Config(_))
        ));
    }
}
