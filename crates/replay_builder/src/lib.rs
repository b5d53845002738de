//! Replay Builder Library
//!
//! Statcast CSV → reconstructed games → JSON document, or
//! MessagePack → LZ4 → SHA256-checksummed binary cache.

use anyhow::{Context, Result};
use pitch_core::replay::{format_count, format_inning, format_score, format_speed};
use pitch_core::{ReconstructConfig, ReplayDocument};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Cache metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayMetadata {
    /// Cache schema version (e.g. "v1")
    pub schema_version: String,
    /// SHA256 checksum of the cache file (hex)
    pub checksum: String,
    /// Creation time (RFC3339)
    pub created_at: String,
    /// Size of the equivalent JSON document (bytes)
    pub original_size: u64,
    /// Cache file size (bytes)
    pub compressed_size: u64,
    /// compressed / original
    pub compression_ratio: f64,
    pub games: usize,
    pub pitches: usize,
}

/// Load a YAML config, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<ReconstructConfig> {
    match path {
        Some(p) => ReconstructConfig::from_path(p)
            .with_context(|| format!("Failed to load config: {}", p.display())),
        None => Ok(ReconstructConfig::default()),
    }
}

/// Read and reconstruct every game of a CSV file.
pub fn reconstruct_file(input_csv: &Path, config: &ReconstructConfig) -> Result<ReplayDocument> {
    let games = pitch_core::reconstruct_csv_path(input_csv, config)
        .with_context(|| format!("Failed to reconstruct CSV: {}", input_csv.display()))?;
    let doc = ReplayDocument::new(games);
    info!(
        games = doc.games.len(),
        pitches = doc.pitch_count(),
        diagnostics = doc.diagnostic_count(),
        "Reconstructed {}",
        input_csv.display()
    );
    Ok(doc)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

/// CSV → pretty (or compact) JSON document on disk
pub fn build_replay_json(
    input_csv: &Path,
    output_json: &Path,
    config: &ReconstructConfig,
    pretty: bool,
) -> Result<ReplayDocument> {
    let doc = reconstruct_file(input_csv, config)?;
    let json = if pretty {
        serde_json::to_vec_pretty(&doc)
    } else {
        serde_json::to_vec(&doc)
    }
    .context("Failed to serialize replay JSON")?;
    write_output(output_json, &json)?;
    Ok(doc)
}

/// CSV → MessagePack+LZ4 cache on disk
pub fn build_replay_cache(
    input_csv: &Path,
    output_cache: &Path,
    config: &ReconstructConfig,
    schema_version: &str,
) -> Result<ReplayMetadata> {
    let doc = reconstruct_file(input_csv, config)?;

    let original_size = serde_json::to_vec(&doc)
        .context("Failed to serialize replay JSON")?
        .len() as u64;

    let msgpack_bytes =
        rmp_serde::to_vec_named(&doc).context("Failed to serialize to MessagePack")?;

    // LZ4 with the uncompressed size prepended
    let compressed = lz4_flex::compress_prepend_size(&msgpack_bytes);
    let compressed_size = compressed.len() as u64;
    debug!(
        msgpack = msgpack_bytes.len(),
        compressed = compressed_size,
        "Cache encoded"
    );

    let checksum = sha256_hex(&compressed);
    write_output(output_cache, &compressed)?;

    Ok(ReplayMetadata {
        schema_version: schema_version.to_string(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        original_size,
        compressed_size,
        compression_ratio: compressed_size as f64 / original_size.max(1) as f64,
        games: doc.games.len(),
        pitches: doc.pitch_count(),
    })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// True when the cache file hashes to `expected_checksum`.
pub fn verify_cache(cache_file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;
    Ok(sha256_hex(&bytes) == expected_checksum)
}

/// Decompress and decode a replay cache.
pub fn load_replay_cache(cache_file: &Path) -> Result<ReplayDocument> {
    let compressed = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;

    let msgpack_bytes =
        lz4_flex::decompress_size_prepended(&compressed).context("Failed to decompress LZ4")?;

    let doc: ReplayDocument =
        rmp_serde::from_slice(&msgpack_bytes).context("Failed to deserialize MessagePack")?;
    Ok(doc)
}

/// JSON Schema of the output document
pub fn replay_schema_json() -> Result<String> {
    let schema = schemars::schema_for!(ReplayDocument);
    serde_json::to_string_pretty(&schema).context("Failed to serialize JSON Schema")
}

/// Human-readable summary: one header per game, one line per at-bat.
pub fn inspect_lines(doc: &ReplayDocument, game_pk: Option<u64>) -> Vec<String> {
    let mut lines = Vec::new();
    for game in doc
        .games
        .iter()
        .filter(|g| game_pk.map_or(true, |pk| g.meta.game_pk == pk))
    {
        let meta = &game.meta;
        lines.push(format!(
            "{} {} ({}) - {} at-bats, {} pitches, final {}",
            meta.game_date,
            meta.team_label,
            meta.game_pk,
            meta.at_bat_count,
            meta.pitch_count,
            format_score(&meta.final_score, &meta.home_team, &meta.away_team)
        ));
        for ab in &game.at_bats {
            let Some(last) = ab.last_pitch() else {
                continue;
            };
            lines.push(format!(
                "  {:>6} AB{:<3} {:<24} {:>2}p {} {} out(s) {}",
                format_inning(ab.inning, ab.half),
                ab.at_bat_number,
                ab.result_label,
                ab.pitches.len(),
                format_count(&last.count_after),
                last.outs_after,
                format_speed(last.row.release_speed)
            ));
        }
        for diagnostic in &game.diagnostics {
            lines.push(format!("  ! {}", diagnostic));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitch_core::REQUIRED_COLUMNS;
    use tempfile::{tempdir, NamedTempFile};

    /// Two at-bats: a groundout then a three-pitch strikeout
    fn sample_csv() -> String {
        let header = REQUIRED_COLUMNS.join(",");
        let pitches = [
            (1, 1, 0, 0, 0, "X", "hit_into_play"),
            (2, 1, 0, 0, 1, "S", "called_strike"),
            (2, 2, 0, 1, 1, "S", "swinging_strike"),
            (2, 3, 0, 2, 1, "S", "swinging_strike"),
        ];
        let mut text = format!("{},events\n", header);
        for (ab, pitch, balls, strikes, outs, call, description) in pitches {
            let event = match (ab, pitch) {
                (1, 1) => "field_out",
                (2, 3) => "strikeout",
                _ => "",
            };
            text.push_str(&format!(
                "2024-04-02,745001,{ab},{pitch},FF,96.4,-1.5,54.0,6.0,5.0,-135.0,-5.0,-10.0,28.0,-20.0,\
                 0.1,2.6,3.4,1.6,{balls},{strikes},{outs},1,Top,NYY,HOU,0,0,{call},{description},\
                 Gerrit Cole,59245{ab},543037,{event}\n"
            ));
        }
        text
    }

    fn sample_file() -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        std::io::Write::write_all(&mut file, sample_csv().as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_build_and_verify_cache() -> Result<()> {
        let csv = sample_file()?;
        let dir = tempdir()?;
        let out = dir.path().join("nested").join("game.msgpack.lz4");

        let meta = build_replay_cache(csv.path(), &out, &ReconstructConfig::default(), "v1")?;
        assert_eq!(meta.schema_version, "v1");
        assert_eq!(meta.games, 1);
        assert_eq!(meta.pitches, 4);
        assert!(meta.compressed_size < meta.original_size);
        assert!(verify_cache(&out, &meta.checksum)?);
        assert!(!verify_cache(&out, "0000")?);

        let loaded = load_replay_cache(&out)?;
        let direct = reconstruct_file(csv.path(), &ReconstructConfig::default())?;
        assert_eq!(loaded, direct);
        Ok(())
    }

    #[test]
    fn test_build_json() -> Result<()> {
        let csv = sample_file()?;
        let dir = tempdir()?;
        let out = dir.path().join("game.json");
        let doc = build_replay_json(csv.path(), &out, &ReconstructConfig::preview(), true)?;
        let text = fs::read_to_string(&out)?;
        let parsed: ReplayDocument = serde_json::from_str(&text)?;
        assert_eq!(parsed, doc);
        assert_eq!(parsed.games[0].at_bats.len(), 2);
        Ok(())
    }

    #[test]
    fn test_inspect_lines() -> Result<()> {
        let csv = sample_file()?;
        let doc = reconstruct_file(csv.path(), &ReconstructConfig::default())?;
        let lines = inspect_lines(&doc, None);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("HOU @ NYY"));
        assert!(lines[1].contains("Field out"));
        assert!(lines[2].contains("Strikeout (swinging)"));
        assert!(lines[2].contains("2 out(s)"));
        assert!(inspect_lines(&doc, Some(1)).is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_column_is_reported() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        std::io::Write::write_all(&mut file, b"game_date,game_pk\n2024-04-02,1\n")?;
        let err = reconstruct_file(file.path(), &ReconstructConfig::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("Missing required column: at_bat_number"));
        Ok(())
    }

    #[test]
    fn test_config_loading() -> Result<()> {
        assert_eq!(load_config(None)?, ReconstructConfig::default());
        let mut file = NamedTempFile::new()?;
        std::io::Write::write_all(&mut file, b"trajectory:\n  time_step_s: 0.01\n")?;
        let config = load_config(Some(file.path()))?;
        assert_eq!(config.trajectory.time_step_s, 0.01);
        Ok(())
    }

    #[test]
    fn test_schema_names_document() -> Result<()> {
        let schema = replay_schema_json()?;
        assert!(schema.contains("\"ReplayDocument\""));
        assert!(schema.contains("games"));
        Ok(())
    }
}
