//! Outs after a pitch

use super::outcome::{PitchDescription, PitchOutcome};
use crate::ingest::PitchRow;

pub const MAX_OUTS: u8 = 3;

pub fn clamp_outs(value: u8) -> u8 {
    value.min(MAX_OUTS)
}

/// Outs recorded by a plate appearance's final pitch.
///
/// The event decides when present; a description that spells out a
/// strikeout counts one out; anything else records none.
pub fn outs_increment(outcome: &PitchOutcome) -> u8 {
    match &outcome.event {
        Some(event) => event.outs_recorded(),
        None if outcome.description == PitchDescription::Strikeout => 1,
        None => 0,
    }
}

/// Where the official starting outs of the next at-bat come from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NextAtBat<'a> {
    /// No further at-bat in this game
    None,
    /// First row of the next at-bat of the same game; its `outs_when_up`
    /// is official even across a half-inning change
    Following(&'a PitchRow),
}

impl<'a> NextAtBat<'a> {
    pub fn resolve(row: &PitchRow, next_first: Option<&'a PitchRow>) -> Self {
        match next_first {
            Some(n) if n.game_pk == row.game_pk => NextAtBat::Following(n),
            _ => NextAtBat::None,
        }
    }

    /// Next at-bat's first row when it continues the same half-inning
    pub fn same_half(&self, row: &PitchRow) -> Option<&'a PitchRow> {
        match *self {
            NextAtBat::Following(n) if row.same_half_inning(n) => Some(n),
            _ => None,
        }
    }

    /// True when the next at-bat opens a new half-inning
    pub fn changes_half(&self, row: &PitchRow) -> bool {
        matches!(*self, NextAtBat::Following(n) if !row.same_half_inning(n))
    }
}

/// Outs after a pitch, given the outs carried in from earlier pitches of the
/// same at-bat.
///
/// Mid at-bat the carried value passes through. On the final pitch the
/// inferred increment is applied, then replaced by the next at-bat's
/// official value when one exists.
pub fn derive_outs_after(
    outcome: &PitchOutcome,
    outs_before: u8,
    is_last_pitch: bool,
    next: NextAtBat<'_>,
) -> u8 {
    if !is_last_pitch {
        return clamp_outs(outs_before);
    }
    match next {
        NextAtBat::Following(n) => clamp_outs(n.outs_when_up),
        NextAtBat::None => clamp_outs(outs_before.saturating_add(outs_increment(outcome))),
    }
}

/// Seed for the following at-bat's outs tracker
pub fn carry_outs(outs_after: u8) -> u8 {
    if outs_after >= MAX_OUTS {
        0
    } else {
        outs_after
    }
}
