//! Typed pitch rows

use crate::engine::outcome::PitchCall;
use crate::engine::trajectory::Kinematics;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half of an inning
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HalfInning {
    Top,
    Bottom,
}

impl HalfInning {
    /// Normalize a raw `inning_topbot` cell.
    ///
    /// Unrecognized values map to `Top`; the second element reports whether
    /// the value was recognized so callers can log the fallback.
    pub fn from_raw(raw: &str) -> (Self, bool) {
        match raw.trim().to_ascii_lowercase().as_str() {
            "top" | "t" => (HalfInning::Top, true),
            "bot" | "bottom" | "b" => (HalfInning::Bottom, true),
            _ => (HalfInning::Top, false),
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            HalfInning::Top => "Top",
            HalfInning::Bottom => "Bot",
        }
    }
}

impl fmt::Display for HalfInning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.short_label())
    }
}

/// Batter side or pitcher hand
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().to_ascii_uppercase().starts_with('L') {
            Handedness::Left
        } else {
            Handedness::Right
        }
    }
}

/// Runner ids on first, second and third base
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub struct Bases {
    pub first: Option<u32>,
    pub second: Option<u32>,
    pub third: Option<u32>,
}

impl Bases {
    pub const EMPTY: Bases = Bases {
        first: None,
        second: None,
        third: None,
    };

    /// Occupancy flags for first, second, third.
    pub fn occupied(&self) -> [bool; 3] {
        [
            self.first.is_some(),
            self.second.is_some(),
            self.third.is_some(),
        ]
    }

    pub fn runner_count(&self) -> usize {
        self.occupied().iter().filter(|&&on| on).count()
    }

    pub fn is_empty(&self) -> bool {
        self.runner_count() == 0
    }
}

/// Home and away runs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub struct ScoreLine {
    pub home: u16,
    pub away: u16,
}

/// One input line. Immutable once parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct PitchRow {
    /// ISO date (`YYYY-MM-DD`)
    pub game_date: String,
    pub game_pk: u64,
    pub at_bat_number: u32,
    pub pitch_number: u32,

    pub pitch_type: String,
    pub pitch_name: Option<String>,
    /// mph
    pub release_speed: f64,
    /// Release point, velocity and acceleration in feet / seconds
    pub kinematics: Kinematics,

    pub plate_x: f64,
    pub plate_z: f64,
    pub sz_top: f64,
    pub sz_bot: f64,

    /// Pre-pitch count
    pub balls: u8,
    pub strikes: u8,
    /// Pre-pitch outs
    pub outs_when_up: u8,
    pub inning: u8,
    pub half: HalfInning,

    pub home_team: String,
    pub away_team: String,
    /// Pre-pitch score
    pub score: ScoreLine,
    pub post_home_score: Option<u16>,
    pub post_away_score: Option<u16>,

    pub call: PitchCall,
    pub description: String,
    pub events: Option<String>,

    /// Pitcher display name
    pub player_name: String,
    pub batter: u32,
    pub pitcher: u32,
    pub stand: Option<Handedness>,
    pub p_throws: Option<Handedness>,

    /// Runners on base before the pitch
    pub runners: Bases,
}

impl PitchRow {
    /// Key of the at-bat this row belongs to
    pub fn at_bat_key(&self) -> (u64, u32) {
        (self.game_pk, self.at_bat_number)
    }

    /// True when `other` is in the same game and the same half-inning
    pub fn same_half_inning(&self, other: &PitchRow) -> bool {
        self.game_pk == other.game_pk && self.inning == other.inning && self.half == other.half
    }

    /// Post-pitch score as reported by the row itself, if any
    pub fn post_score(&self) -> Option<ScoreLine> {
        match (self.post_home_score, self.post_away_score) {
            (Some(home), Some(away)) => Some(ScoreLine { home, away }),
            (Some(home), None) => Some(ScoreLine { home, away: self.score.away }),
            (None, Some(away)) => Some(ScoreLine { home: self.score.home, away }),
            (None, None) => None,
        }
    }

    /// Terminal event text, ignoring blank cells
    pub fn event_text(&self) -> Option<&str> {
        self.events.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}
