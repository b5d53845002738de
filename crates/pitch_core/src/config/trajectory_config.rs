//! Trajectory sampling parameters

use serde::{Deserialize, Serialize};

/// Pitch flight sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrajectoryConfig {
    /// Sampling step in seconds (default: 1/240)
    pub time_step_s: f64,
    /// Minimum samples per pitch, including release and plate crossing (default: 10)
    pub min_samples: usize,
    /// Coefficients below this magnitude are treated as zero (default: 1e-8)
    pub negligible: f64,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            time_step_s: 1.0 / 240.0,
            min_samples: 10,
            negligible: 1e-8,
        }
    }
}

impl TrajectoryConfig {
    /// Twice the default sampling rate, for slow-motion playback
    pub fn high_resolution() -> Self {
        Self {
            time_step_s: 1.0 / 480.0,
            min_samples: 20,
            ..Self::default()
        }
    }

    /// Coarse sampling for thumbnails and previews
    pub fn preview() -> Self {
        Self {
            time_step_s: 1.0 / 60.0,
            ..Self::default()
        }
    }
}
