//! Game-level metadata and the final replay document

use super::grouper::GroupedAtBats;
use super::labels::team_label;
use super::types::{AtBat, GameMeta, GameReplay};
use crate::SCHEMA_VERSION;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Scan every pitch of a game once for its metadata.
///
/// Returns `None` when there are no pitches.
pub fn assemble_meta(at_bats: &[AtBat]) -> Option<GameMeta> {
    let first = at_bats.iter().flat_map(|ab| ab.pitches.iter()).next()?;
    let row = &first.row;

    let mut pitchers = BTreeMap::new();
    let mut pitch_count = 0;
    let mut final_score = row.score;
    for pitch in at_bats.iter().flat_map(|ab| ab.pitches.iter()) {
        pitchers
            .entry(pitch.row.pitcher)
            .or_insert_with(|| pitch.row.player_name.clone());
        final_score = pitch.score_after;
        pitch_count += 1;
    }

    let date = NaiveDate::parse_from_str(&row.game_date, "%Y-%m-%d").ok();
    if date.is_none() {
        debug!(game_date = %row.game_date, "game_date is not an ISO date");
    }

    Some(GameMeta {
        game_pk: row.game_pk,
        game_date: row.game_date.clone(),
        date,
        home_team: row.home_team.clone(),
        away_team: row.away_team.clone(),
        team_label: team_label(&row.home_team, &row.away_team),
        pitchers,
        final_score,
        at_bat_count: at_bats.len(),
        pitch_count,
    })
}

/// Wrap grouped at-bats of one game into a replay document.
pub fn assemble_game(grouped: GroupedAtBats) -> Option<GameReplay> {
    let meta = assemble_meta(&grouped.at_bats)?;
    info!(
        game_pk = meta.game_pk,
        at_bats = meta.at_bat_count,
        pitches = meta.pitch_count,
        diagnostics = grouped.diagnostics.len(),
        "Game reconstructed"
    );
    Some(GameReplay {
        schema_version: SCHEMA_VERSION,
        meta,
        at_bats: grouped.at_bats,
        diagnostics: grouped.diagnostics,
    })
}
