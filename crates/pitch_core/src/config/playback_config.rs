//! Playback timing parameters

use serde::{Deserialize, Serialize};

/// How long a pitch stays on screen, derived from its flight time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Time added after plate crossing (default: 0.8)
    pub lead_out_s: f64,
    /// Lower bound of a pitch's playback duration (default: 1.2)
    pub min_duration_s: f64,
    /// Upper bound of a pitch's playback duration (default: 4.0)
    pub max_duration_s: f64,
    /// Duration used when a pitch has no trajectory samples (default: 1.5)
    pub fallback_duration_s: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            lead_out_s: 0.8,
            min_duration_s: 1.2,
            max_duration_s: 4.0,
            fallback_duration_s: 1.5,
        }
    }
}
