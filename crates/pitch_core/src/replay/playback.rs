//! Playback timing
//!
//! Each pitch stays on screen for its flight time plus a short lead-out,
//! bounded on both sides. The interval between auto-advanced pitches is
//! that duration scaled by the playback speed.

use crate::config::PlaybackConfig;
use crate::engine::trajectory::Trajectory;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported playback speeds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackSpeed {
    Half,
    #[default]
    Normal,
    Double,
}

impl PlaybackSpeed {
    pub fn factor(self) -> f64 {
        match self {
            PlaybackSpeed::Half => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Double => 2.0,
        }
    }

    /// Parse `0.5`, `1`, `2` (with or without a trailing `x`).
    pub fn from_factor_str(raw: &str) -> Option<Self> {
        let value: f64 = raw
            .trim()
            .trim_end_matches(|c: char| c.eq_ignore_ascii_case(&'x'))
            .parse()
            .ok()?;
        [PlaybackSpeed::Half, PlaybackSpeed::Normal, PlaybackSpeed::Double]
            .into_iter()
            .find(|s| (s.factor() - value).abs() < 1e-9)
    }
}

/// On-screen duration (s) for a pitch
pub fn playback_duration(trajectory: &Trajectory, config: &PlaybackConfig) -> f64 {
    match trajectory.plate_crossing() {
        Some(last) => (last.t + config.lead_out_s)
            .min(config.max_duration_s)
            .max(config.min_duration_s),
        None => config.fallback_duration_s,
    }
}

/// Milliseconds until the next pitch when auto-advancing
pub fn playback_interval_ms(duration_s: f64, speed: PlaybackSpeed) -> f64 {
    duration_s / speed.factor() * 1000.0
}
