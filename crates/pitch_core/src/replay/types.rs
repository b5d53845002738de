use crate::engine::count::CountResult;
use crate::engine::outcome::PitchOutcome;
use crate::engine::trajectory::{Trajectory, TrajectorySample};
use crate::ingest::{Bases, Handedness, HalfInning, PitchRow, ScoreLine};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable pitch identity: game, at-bat, pitch number
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
pub struct PitchKey {
    pub game_pk: u64,
    pub at_bat_number: u32,
    pub pitch_number: u32,
}

impl PitchKey {
    pub fn of(row: &PitchRow) -> Self {
        Self {
            game_pk: row.game_pk,
            at_bat_number: row.at_bat_number,
            pitch_number: row.pitch_number,
        }
    }
}

impl fmt::Display for PitchKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.game_pk, self.at_bat_number, self.pitch_number
        )
    }
}

/// One pitch with everything derived from it. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct DerivedPitch {
    pub key: PitchKey,
    /// Position in the game's flattened pitch order, from 0
    pub sequence: usize,
    pub row: PitchRow,
    pub outcome: PitchOutcome,
    pub trajectory: Trajectory,
    /// On-screen time for this pitch (s)
    pub playback_duration: f64,
    pub count_after: CountResult,
    /// 0..=3
    pub outs_after: u8,
    pub score_after: ScoreLine,
    /// Last pitch of its at-bat
    pub is_at_bat_end: bool,
    pub result_label: String,
    pub highlight: bool,
    pub bases_after: Bases,
}

impl DerivedPitch {
    /// Time to plate (s)
    pub fn time_to_plate(&self) -> f64 {
        self.trajectory.duration
    }

    pub fn position_at(&self, t: f64) -> Option<TrajectorySample> {
        self.trajectory.position_at(t)
    }

    /// Pitcher's throwing hand
    pub fn release_side(&self) -> Option<Handedness> {
        self.row.p_throws
    }

    /// Trajectory in renderer coordinates
    pub fn scene_path(&self) -> Vec<[f64; 3]> {
        self.trajectory
            .samples
            .iter()
            .map(TrajectorySample::to_scene)
            .collect()
    }
}

/// One batter's plate appearance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct AtBat {
    pub game_pk: u64,
    pub at_bat_number: u32,
    pub inning: u8,
    pub half: HalfInning,
    pub batter: u32,
    pub pitcher: u32,
    pub pitches: Vec<DerivedPitch>,
    /// Terminal event of the final pitch, when reported
    pub summary_event: Option<String>,
    /// Result label of the final pitch
    pub result_label: String,
}

impl AtBat {
    /// `game-at_bat`
    pub fn key(&self) -> String {
        format!("{}-{}", self.game_pk, self.at_bat_number)
    }

    pub fn last_pitch(&self) -> Option<&DerivedPitch> {
        self.pitches.last()
    }

    /// Outs after the final pitch
    pub fn outs_after(&self) -> u8 {
        self.last_pitch().map(|p| p.outs_after).unwrap_or(0)
    }
}

/// Whole-game facts gathered after grouping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct GameMeta {
    pub game_pk: u64,
    pub game_date: String,
    /// Parsed `game_date`, when it is a valid ISO date
    pub date: Option<NaiveDate>,
    pub home_team: String,
    pub away_team: String,
    /// `AWAY @ HOME`
    pub team_label: String,
    /// Pitcher id → display name, first name seen wins
    pub pitchers: BTreeMap<u32, String>,
    pub final_score: ScoreLine,
    pub at_bat_count: usize,
    pub pitch_count: usize,
}

/// Something the reconstruction recovered from rather than failed on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnknownCall { code: String },
    UnknownDescription { description: String },
    UnknownEvent { event: String },
    /// Inferred outs disagreed with the next at-bat's stated outs
    OutsReconciled { computed: u8, official: u8 },
    /// Carried outs disagreed with the at-bat's own `outs_when_up`
    OutsCarryMismatch { carried: u8, stated: u8 },
    /// Final pitch of an at-bat whose outcome did not look terminal
    UnendedAtBat,
    /// Release kinematics never reach the plate plane
    NoPlateCrossing,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct Diagnostic {
    pub key: PitchKey,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnknownCall { code } => {
                write!(f, "{}: unknown pitch call '{}'", self.key, code)
            }
            DiagnosticKind::UnknownDescription { description } => {
                write!(f, "{}: unknown description '{}'", self.key, description)
            }
            DiagnosticKind::UnknownEvent { event } => {
                write!(f, "{}: unknown event '{}'", self.key, event)
            }
            DiagnosticKind::OutsReconciled { computed, official } => write!(
                f,
                "{}: inferred {} outs, next at-bat states {}",
                self.key, computed, official
            ),
            DiagnosticKind::OutsCarryMismatch { carried, stated } => write!(
                f,
                "{}: carried {} outs, row states {}",
                self.key, carried, stated
            ),
            DiagnosticKind::UnendedAtBat => {
                write!(f, "{}: at-bat closed without a terminal outcome", self.key)
            }
            DiagnosticKind::NoPlateCrossing => {
                write!(f, "{}: pitch flight never reaches the plate", self.key)
            }
        }
    }
}

/// Reconstructed game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct GameReplay {
    pub schema_version: u8,
    pub meta: GameMeta,
    pub at_bats: Vec<AtBat>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GameReplay {
    /// Flattened pitch view in play order
    pub fn pitches(&self) -> impl Iterator<Item = &DerivedPitch> {
        self.at_bats.iter().flat_map(|ab| ab.pitches.iter())
    }

    /// Pitch by flattened index
    pub fn pitch(&self, index: usize) -> Option<&DerivedPitch> {
        self.pitches().nth(index)
    }

    pub fn pitch_count(&self) -> usize {
        self.at_bats.iter().map(|ab| ab.pitches.len()).sum()
    }

    /// Index of the at-bat holding the pitch at flattened `index`
    pub fn at_bat_index_of(&self, index: usize) -> Option<usize> {
        let mut remaining = index;
        for (i, ab) in self.at_bats.iter().enumerate() {
            if remaining < ab.pitches.len() {
                return Some(i);
            }
            remaining -= ab.pitches.len();
        }
        None
    }
}
