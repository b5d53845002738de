//! Post-pitch ball/strike count
//!
//! `balls`/`strikes` on a row are the count *before* the pitch. The count
//! after the pitch is read from the next row of the same at-bat when there
//! is one, otherwise inferred from the row's own outcome.

use super::outcome::{PitchCall, PitchDescription, PitchOutcome};
use crate::ingest::PitchRow;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const MAX_BALLS: u8 = 4;
pub const MAX_STRIKES: u8 = 3;

/// Count after a pitch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub struct CountResult {
    pub balls: u8,
    pub strikes: u8,
    pub is_at_bat_end: bool,
}

impl CountResult {
    fn open(balls: u8, strikes: u8) -> Self {
        Self {
            balls: balls.min(MAX_BALLS),
            strikes: strikes.min(MAX_STRIKES),
            is_at_bat_end: false,
        }
    }
}

/// Post-pitch count for `row`.
///
/// `next` is only honored when it belongs to the same game and at-bat.
pub fn derive_post_count(row: &PitchRow, next: Option<&PitchRow>) -> CountResult {
    match next {
        Some(n) if n.at_bat_key() == row.at_bat_key() => CountResult::open(n.balls, n.strikes),
        _ => infer_post_count(row, &PitchOutcome::from_row(row)),
    }
}

/// Rule-based count inference from a single row.
///
/// Unrecognized calls and descriptions leave the count unchanged.
pub fn infer_post_count(row: &PitchRow, outcome: &PitchOutcome) -> CountResult {
    let prev_balls = row.balls.min(MAX_BALLS);
    let prev_strikes = row.strikes.min(MAX_STRIKES);
    let mut balls = prev_balls;
    let mut strikes = prev_strikes;
    let mut ended = false;

    let description = &outcome.description;
    if outcome.call == PitchCall::Ball || description.is_ball_like() {
        match description {
            PitchDescription::HitByPitch | PitchDescription::Walk => {
                balls = MAX_BALLS;
                ended = true;
            }
            _ => {
                balls = (prev_balls + 1).min(MAX_BALLS);
                ended = balls == MAX_BALLS;
            }
        }
    } else if outcome.call == PitchCall::Strike {
        if description.is_foul() {
            if prev_strikes < 2 {
                strikes = prev_strikes + 1;
            }
        } else if description.is_counted_strike() {
            strikes = (prev_strikes + 1).min(MAX_STRIKES);
            ended = strikes == MAX_STRIKES;
        } else if *description == PitchDescription::Strikeout {
            strikes = MAX_STRIKES;
            ended = true;
        }
    } else if outcome.call == PitchCall::InPlay {
        ended = true;
    }

    // A terminal event is the final word on the plate appearance
    if let Some(event) = &outcome.event {
        if event.is_walk() {
            balls = MAX_BALLS;
        }
        if event.is_strikeout() {
            strikes = MAX_STRIKES;
        }
        ended = true;
    }

    CountResult {
        balls,
        strikes,
        is_at_bat_end: ended || balls == MAX_BALLS || strikes == MAX_STRIKES,
    }
}
