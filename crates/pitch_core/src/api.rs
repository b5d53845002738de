//! Entry points: rows or CSV in, reconstructed games out

use crate::config::ReconstructConfig;
use crate::engine::sort::sort_rows;
use crate::error::Result;
use crate::ingest::{read_csv, read_csv_path, PitchRow};
use crate::replay::{assemble_game, group_at_bats, GameReplay};
use crate::{SCHEMA_VERSION, VERSION};
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Top-level output document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ReplayDocument {
    pub schema_version: u8,
    /// Version of the library that produced the document
    pub generator: String,
    pub games: Vec<GameReplay>,
}

impl ReplayDocument {
    pub fn new(games: Vec<GameReplay>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generator: format!("pitch_core {}", VERSION),
            games,
        }
    }

    pub fn pitch_count(&self) -> usize {
        self.games.iter().map(GameReplay::pitch_count).sum()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.games.iter().map(|g| g.diagnostics.len()).sum()
    }
}

fn same_game(a: &PitchRow, b: &PitchRow) -> bool {
    a.game_date == b.game_date && a.game_pk == b.game_pk
}

/// Rows of one game, in any order.
pub fn reconstruct_game(rows: Vec<PitchRow>, config: &ReconstructConfig) -> Option<GameReplay> {
    let rows = sort_rows(rows);
    assemble_game(group_at_bats(&rows, config))
}

/// Rows of any number of games, in any order.
///
/// Games come back in chronological order; each is reconstructed on its
/// own rayon task.
pub fn reconstruct(rows: Vec<PitchRow>, config: &ReconstructConfig) -> Vec<GameReplay> {
    let rows = sort_rows(rows);
    let games: Vec<&[PitchRow]> = rows.chunk_by(same_game).collect();
    debug!(games = games.len(), rows = rows.len(), "Reconstructing games");

    games
        .par_iter()
        .filter_map(|game| assemble_game(group_at_bats(game, config)))
        .collect()
}

pub fn reconstruct_csv<R: Read>(reader: R, config: &ReconstructConfig) -> Result<Vec<GameReplay>> {
    let rows = read_csv(reader)?;
    Ok(reconstruct(rows, config))
}

pub fn reconstruct_csv_path<P: AsRef<Path>>(
    path: P,
    config: &ReconstructConfig,
) -> Result<Vec<GameReplay>> {
    let rows = read_csv_path(path)?;
    Ok(reconstruct(rows, config))
}

/// CSV text in, pretty-printed `ReplayDocument` JSON out
pub fn reconstruct_csv_json(csv_text: &str, config: &ReconstructConfig) -> Result<String> {
    let games = reconstruct_csv(csv_text.as_bytes(), config)?;
    let json = serde_json::to_string_pretty(&ReplayDocument::new(games))?;
    Ok(json)
}
