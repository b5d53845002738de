//! Human-readable labels for pitches, counts, innings and scores

use crate::engine::count::CountResult;
use crate::engine::outcome::{PitchDescription, PitchOutcome, PlayEvent};
use crate::ingest::{HalfInning, PitchRow, ScoreLine};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Classified play → label
static EVENT_LABELS: Lazy<FxHashMap<PlayEvent, &'static str>> = Lazy::new(|| {
    [
        (PlayEvent::Strikeout, "Strikeout"),
        (PlayEvent::StrikeoutDoublePlay, "Strikeout double play"),
        (PlayEvent::StrikeoutTriplePlay, "Strikeout triple play"),
        (PlayEvent::Single, "Single"),
        (PlayEvent::Double, "Double"),
        (PlayEvent::Triple, "Triple"),
        (PlayEvent::HomeRun, "Home run"),
        (PlayEvent::Walk, "Walk"),
        (PlayEvent::IntentWalk, "Intentional walk"),
        (PlayEvent::HitByPitch, "Hit by pitch"),
        (PlayEvent::FieldOut, "Field out"),
        (PlayEvent::Groundout, "Groundout"),
        (PlayEvent::Flyout, "Flyout"),
        (PlayEvent::Lineout, "Lineout"),
        (PlayEvent::PopOut, "Pop out"),
        (PlayEvent::SacFly, "Sacrifice fly"),
        (PlayEvent::SacBunt, "Sacrifice bunt"),
        (PlayEvent::SacFlyDoublePlay, "Sacrifice fly double play"),
        (PlayEvent::SacBuntDoublePlay, "Sacrifice bunt double play"),
        (PlayEvent::ForceOut, "Force out"),
        (PlayEvent::FieldersChoice, "Fielder's choice"),
        (PlayEvent::FieldersChoiceOut, "Fielder's choice out"),
        (PlayEvent::FieldError, "Reached on error"),
        (PlayEvent::CatcherInterference, "Catcher interference"),
        (PlayEvent::GroundedIntoDoublePlay, "Double play"),
        (PlayEvent::DoublePlay, "Double play"),
        (PlayEvent::TriplePlay, "Triple play"),
        (PlayEvent::RunnerOut, "Runner out"),
        (PlayEvent::TruncatedPlateAppearance, "Plate appearance cut short"),
    ]
    .into_iter()
    .collect()
});

pub const UNKNOWN_RESULT: &str = "Unknown result";

fn strikeout_label(description: &PitchDescription) -> &'static str {
    match description {
        PitchDescription::CalledStrike => "Strikeout (looking)",
        d if d.is_swinging() => "Strikeout (swinging)",
        _ => "Strikeout",
    }
}

/// Result label for one pitch.
///
/// The terminal event wins when present; a plain strikeout is refined to
/// looking or swinging from the description. Without an event the
/// description is labelled. Unmapped text is passed through as-is.
pub fn result_label(row: &PitchRow, outcome: &PitchOutcome) -> String {
    if let Some(event) = &outcome.event {
        if *event == PlayEvent::Strikeout {
            return strikeout_label(&outcome.description).to_string();
        }
        return match EVENT_LABELS.get(event) {
            Some(label) => (*label).to_string(),
            None => row.event_text().unwrap_or_default().to_string(),
        };
    }

    let label = match &outcome.description {
        PitchDescription::Empty => UNKNOWN_RESULT,
        PitchDescription::Strikeout => "Strikeout",
        PitchDescription::CalledStrike => "Called strike",
        PitchDescription::FoulTip | PitchDescription::BuntFoulTip => "Foul tip",
        d if d.is_swinging() => "Swinging strike",
        d if d.is_foul() => "Foul",
        PitchDescription::HitByPitch => "Hit by pitch",
        PitchDescription::Walk => "Walk",
        d if d.is_ball_like() => "Ball",
        PitchDescription::AutomaticStrike => "Automatic strike",
        PitchDescription::HitIntoPlay => "In play",
        _ => return row.description.trim().to_string(),
    };
    label.to_string()
}

/// `B2 / S1`
pub fn format_count(count: &CountResult) -> String {
    format!("B{} / S{}", count.balls, count.strikes)
}

/// `Top 3` / `Bot 3`
pub fn format_inning(inning: u8, half: HalfInning) -> String {
    format!("{} {}", half.short_label(), inning)
}

/// `HOU 1 - 2 NYY` (away first)
pub fn format_score(score: &ScoreLine, home_team: &str, away_team: &str) -> String {
    format!(
        "{} {} - {} {}",
        away_team, score.away, score.home, home_team
    )
}

/// `95.1 mph`, or `-- mph` for non-finite input
pub fn format_speed(mph: f64) -> String {
    if mph.is_finite() {
        format!("{:.1} mph", mph)
    } else {
        "-- mph".to_string()
    }
}

/// `HOU @ NYY`
pub fn team_label(home_team: &str, away_team: &str) -> String {
    format!("{} @ {}", away_team, home_team)
}

/// Filled indicator lamps for balls, strikes and outs.
///
/// A scoreboard shows three ball lamps and two each for strikes and outs;
/// the terminal value of each (ball four, strike three, third out) lights
/// nothing extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountIndicator {
    pub balls: u8,
    pub strikes: u8,
    pub outs: u8,
}

impl CountIndicator {
    pub const BALL_LAMPS: u8 = 3;
    pub const STRIKE_LAMPS: u8 = 2;
    pub const OUT_LAMPS: u8 = 2;

    pub fn new(balls: u8, strikes: u8, outs: u8) -> Self {
        Self {
            balls: balls.min(Self::BALL_LAMPS),
            strikes: strikes.min(Self::STRIKE_LAMPS),
            outs: outs.min(Self::OUT_LAMPS),
        }
    }
}
