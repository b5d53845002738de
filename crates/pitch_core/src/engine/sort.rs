//! Chronological ordering of pitch rows

use crate::ingest::PitchRow;
use std::cmp::Ordering;

/// Sort key: (date, game, at-bat, pitch)
pub fn chronological_key(row: &PitchRow) -> (&str, u64, u32, u32) {
    (
        row.game_date.as_str(),
        row.game_pk,
        row.at_bat_number,
        row.pitch_number,
    )
}

pub fn chronological_cmp(a: &PitchRow, b: &PitchRow) -> Ordering {
    chronological_key(a).cmp(&chronological_key(b))
}

/// Stable ascending sort; ties keep input order.
pub fn sort_rows(mut rows: Vec<PitchRow>) -> Vec<PitchRow> {
    rows.sort_by(chronological_cmp);
    rows
}

pub fn is_sorted(rows: &[PitchRow]) -> bool {
    rows.windows(2)
        .all(|w| chronological_cmp(&w[0], &w[1]) != Ordering::Greater)
}
