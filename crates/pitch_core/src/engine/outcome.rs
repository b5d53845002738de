//! Pitch outcome vocabulary
//!
//! Raw `type`, `description` and `events` cells are classified once into
//! closed enums. Vocabulary that is not recognized lands in an explicit
//! `Unknown` variant so callers can surface it instead of guessing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Three-way pitch result code (`type` column)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PitchCall {
    /// `B`
    Ball,
    /// `S`
    Strike,
    /// `X`
    InPlay,
    Unknown(String),
}

impl PitchCall {
    pub fn from_code(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "B" => PitchCall::Ball,
            "S" => PitchCall::Strike,
            "X" => PitchCall::InPlay,
            other => PitchCall::Unknown(other.to_string()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, PitchCall::Unknown(_))
    }
}

/// Pitch-level description (`description` column)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PitchDescription {
    Ball,
    BlockedBall,
    IntentBall,
    Pitchout,
    /// Automatic ball, including pitch-timer violations by the pitcher
    AutomaticBall,
    HitByPitch,
    /// Walk spelled out in the description rather than in `events`
    Walk,

    CalledStrike,
    SwingingStrike,
    SwingingStrikeBlocked,
    SwingingPitchout,
    MissedBunt,
    FoulTip,
    BuntFoulTip,
    /// Automatic strike, including pitch-timer violations by the batter
    AutomaticStrike,
    /// Strikeout spelled out in the description rather than in `events`
    Strikeout,

    Foul,
    FoulBunt,
    FoulPitchout,

    HitIntoPlay,

    /// Blank description
    Empty,
    Unknown(String),
}

impl PitchDescription {
    pub fn classify(raw: &str) -> Self {
        let text = raw.trim().to_ascii_lowercase();
        match text.as_str() {
            "" => PitchDescription::Empty,
            "ball" => PitchDescription::Ball,
            "blocked_ball" => PitchDescription::BlockedBall,
            "intent_ball" => PitchDescription::IntentBall,
            "pitchout" => PitchDescription::Pitchout,
            "automatic_ball" | "pitch_timer_violation_on_pitcher" => {
                PitchDescription::AutomaticBall
            }
            "hit_by_pitch" => PitchDescription::HitByPitch,
            "walk" | "intent_walk" => PitchDescription::Walk,
            "called_strike" => PitchDescription::CalledStrike,
            "swinging_strike" => PitchDescription::SwingingStrike,
            "swinging_strike_blocked" => PitchDescription::SwingingStrikeBlocked,
            "swinging_pitchout" => PitchDescription::SwingingPitchout,
            "missed_bunt" => PitchDescription::MissedBunt,
            "foul_tip" | "foul_tip_strike" => PitchDescription::FoulTip,
            "bunt_foul_tip" => PitchDescription::BuntFoulTip,
            "automatic_strike" | "pitch_timer_violation_on_batter" => {
                PitchDescription::AutomaticStrike
            }
            "foul" => PitchDescription::Foul,
            "foul_bunt" => PitchDescription::FoulBunt,
            "foul_pitchout" => PitchDescription::FoulPitchout,
            t if t.starts_with("hit_into_play") => PitchDescription::HitIntoPlay,
            t if t.starts_with("strikeout") => PitchDescription::Strikeout,
            _ => PitchDescription::Unknown(raw.trim().to_string()),
        }
    }

    /// Descriptions that count as a ball whatever the `type` code says
    pub fn is_ball_like(&self) -> bool {
        matches!(
            self,
            PitchDescription::Ball
                | PitchDescription::BlockedBall
                | PitchDescription::IntentBall
                | PitchDescription::Pitchout
                | PitchDescription::AutomaticBall
                | PitchDescription::HitByPitch
                | PitchDescription::Walk
        )
    }

    /// Fouls never produce a third strike
    pub fn is_foul(&self) -> bool {
        matches!(
            self,
            PitchDescription::Foul | PitchDescription::FoulBunt | PitchDescription::FoulPitchout
        )
    }

    /// Strikes that can be strike three
    pub fn is_counted_strike(&self) -> bool {
        matches!(
            self,
            PitchDescription::CalledStrike
                | PitchDescription::SwingingStrike
                | PitchDescription::SwingingStrikeBlocked
                | PitchDescription::SwingingPitchout
                | PitchDescription::MissedBunt
                | PitchDescription::FoulTip
                | PitchDescription::BuntFoulTip
                | PitchDescription::AutomaticStrike
                | PitchDescription::Empty
        )
    }

    pub fn is_swinging(&self) -> bool {
        matches!(
            self,
            PitchDescription::SwingingStrike
                | PitchDescription::SwingingStrikeBlocked
                | PitchDescription::SwingingPitchout
                | PitchDescription::MissedBunt
                | PitchDescription::FoulTip
                | PitchDescription::BuntFoulTip
        )
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, PitchDescription::Unknown(_))
    }
}

/// Plate-appearance result (`events` column)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlayEvent {
    Single,
    Double,
    Triple,
    HomeRun,
    Walk,
    IntentWalk,
    HitByPitch,
    Strikeout,
    StrikeoutDoublePlay,
    StrikeoutTriplePlay,
    FieldOut,
    Groundout,
    Flyout,
    Lineout,
    PopOut,
    ForceOut,
    GroundedIntoDoublePlay,
    DoublePlay,
    TriplePlay,
    FieldersChoice,
    FieldersChoiceOut,
    SacFly,
    SacBunt,
    SacFlyDoublePlay,
    SacBuntDoublePlay,
    FieldError,
    CatcherInterference,
    /// Caught stealing, pickoffs and other runner outs that end a plate appearance
    RunnerOut,
    /// Plate appearance cut short (inning ended on the bases)
    TruncatedPlateAppearance,
    Unknown(String),
}

impl PlayEvent {
    pub fn classify(raw: &str) -> Self {
        let text = raw.trim().to_ascii_lowercase();
        match text.as_str() {
            "single" => PlayEvent::Single,
            "double" => PlayEvent::Double,
            "triple" => PlayEvent::Triple,
            "home_run" => PlayEvent::HomeRun,
            "walk" => PlayEvent::Walk,
            "intent_walk" => PlayEvent::IntentWalk,
            "hit_by_pitch" => PlayEvent::HitByPitch,
            "strikeout" => PlayEvent::Strikeout,
            "strikeout_double_play" => PlayEvent::StrikeoutDoublePlay,
            "strikeout_triple_play" => PlayEvent::StrikeoutTriplePlay,
            "field_out" => PlayEvent::FieldOut,
            "groundout" | "grounded_out" | "ground_ball_out" => PlayEvent::Groundout,
            "flyout" | "fly_out" => PlayEvent::Flyout,
            "lineout" | "line_out" => PlayEvent::Lineout,
            "pop_out" | "popout" => PlayEvent::PopOut,
            "force_out" => PlayEvent::ForceOut,
            "grounded_into_double_play" => PlayEvent::GroundedIntoDoublePlay,
            "double_play" => PlayEvent::DoublePlay,
            "triple_play" => PlayEvent::TriplePlay,
            "fielders_choice" => PlayEvent::FieldersChoice,
            "fielders_choice_out" => PlayEvent::FieldersChoiceOut,
            "sac_fly" | "sacrifice_fly" => PlayEvent::SacFly,
            "sac_bunt" | "sacrifice_bunt" => PlayEvent::SacBunt,
            "sac_fly_double_play" => PlayEvent::SacFlyDoublePlay,
            "sac_bunt_double_play" => PlayEvent::SacBuntDoublePlay,
            "field_error" => PlayEvent::FieldError,
            "catcher_interf" | "catcher_interference" => PlayEvent::CatcherInterference,
            "truncated_pa" => PlayEvent::TruncatedPlateAppearance,
            "other_out" => PlayEvent::RunnerOut,
            t if t.starts_with("caught_stealing") || t.starts_with("pickoff") => {
                PlayEvent::RunnerOut
            }
            _ => PlayEvent::Unknown(raw.trim().to_string()),
        }
    }

    pub fn is_walk(&self) -> bool {
        matches!(self, PlayEvent::Walk | PlayEvent::IntentWalk)
    }

    pub fn is_strikeout(&self) -> bool {
        matches!(
            self,
            PlayEvent::Strikeout | PlayEvent::StrikeoutDoublePlay | PlayEvent::StrikeoutTriplePlay
        )
    }

    /// Outs recorded by the play
    pub fn outs_recorded(&self) -> u8 {
        match self {
            PlayEvent::TriplePlay | PlayEvent::StrikeoutTriplePlay => 3,
            PlayEvent::GroundedIntoDoublePlay
            | PlayEvent::DoublePlay
            | PlayEvent::StrikeoutDoublePlay
            | PlayEvent::SacFlyDoublePlay
            | PlayEvent::SacBuntDoublePlay => 2,
            PlayEvent::Strikeout
            | PlayEvent::FieldOut
            | PlayEvent::Groundout
            | PlayEvent::Flyout
            | PlayEvent::Lineout
            | PlayEvent::PopOut
            | PlayEvent::ForceOut
            | PlayEvent::FieldersChoiceOut
            | PlayEvent::SacFly
            | PlayEvent::SacBunt => 1,
            _ => 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, PlayEvent::Unknown(_))
    }
}

/// Classified view of a row's three outcome cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PitchOutcome {
    pub call: PitchCall,
    pub description: PitchDescription,
    pub event: Option<PlayEvent>,
}

impl PitchOutcome {
    pub fn classify(call: &PitchCall, description: &str, events: Option<&str>) -> Self {
        Self {
            call: call.clone(),
            description: PitchDescription::classify(description),
            event: events
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(PlayEvent::classify),
        }
    }

    pub fn from_row(row: &crate::ingest::PitchRow) -> Self {
        Self::classify(&row.call, &row.description, row.event_text())
    }
}
