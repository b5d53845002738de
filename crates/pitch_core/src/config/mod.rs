//! # Reconstruction Configuration
//!
//! All tunable constants of the reconstruction pipeline live here.
//!
//! ## Usage
//! ```rust
//! use pitch_core::config::ReconstructConfig;
//!
//! let config = ReconstructConfig::default();
//! let slow_motion = ReconstructConfig::high_resolution();
//! ```

mod playback_config;
mod trajectory_config;

pub use playback_config::PlaybackConfig;
pub use trajectory_config::TrajectoryConfig;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ReconstructConfig {
    /// Trajectory sampling
    #[serde(default)]
    pub trajectory: TrajectoryConfig,
    /// Playback timing
    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl ReconstructConfig {
    pub fn high_resolution() -> Self {
        Self {
            trajectory: TrajectoryConfig::high_resolution(),
            ..Self::default()
        }
    }

    pub fn preview() -> Self {
        Self {
            trajectory: TrajectoryConfig::preview(),
            ..Self::default()
        }
    }

    /// Parse a YAML document. Missing keys fall back to defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.trajectory;
        if !(t.time_step_s.is_finite() && t.time_step_s > 0.0) {
            return Err(ConfigError::Invalid {
                field: "trajectory.time_step_s",
                reason: format!("must be a positive number, got {}", t.time_step_s),
            });
        }
        if t.min_samples < 2 {
            return Err(ConfigError::Invalid {
                field: "trajectory.min_samples",
                reason: format!("must be at least 2, got {}", t.min_samples),
            });
        }
        if !(t.negligible.is_finite() && t.negligible >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "trajectory.negligible",
                reason: format!("must be non-negative, got {}", t.negligible),
            });
        }

        let p = &self.playback;
        if p.lead_out_s < 0.0 {
            return Err(ConfigError::Invalid {
                field: "playback.lead_out_s",
                reason: format!("must be non-negative, got {}", p.lead_out_s),
            });
        }
        if p.min_duration_s > p.max_duration_s {
            return Err(ConfigError::Invalid {
                field: "playback.min_duration_s",
                reason: format!(
                    "{} exceeds max_duration_s {}",
                    p.min_duration_s, p.max_duration_s
                ),
            });
        }
        Ok(())
    }
}
